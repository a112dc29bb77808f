use rocket::State;
use sea_orm::DatabaseConnection;

/// DB接続ヘルスチェック (GET /api/db-health)
/// 監視・疎通確認用のためプレーンテキストを返す。認証不要。
#[get("/db-health")]
pub async fn db_health(db: &State<DatabaseConnection>) -> String {
    match db.inner().ping().await {
        Ok(_) => "Database connection is successful!".to_string(),
        Err(e) => {
            log::error!("DB health check failed: {}", e);
            format!("Failed to connect to database: {}", e)
        }
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![db_health]
}
