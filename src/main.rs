use todo_backend::build_rocket;

/// アプリケーションのメインエントリーポイント。
#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    let _ = build_rocket().await.launch().await?;
    Ok(())
}
