use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;

use crate::errors::AppError;
use crate::services::tag_service::TagService;

/// タグ名サジェスト (GET /api/tags/suggest?search=)
/// 入力補完用。検索文字列が空のときは空リスト。認証不要。
#[get("/suggest?<search>")]
pub async fn suggest(
    db: &State<DatabaseConnection>,
    search: Option<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = TagService::suggest(db.inner(), search.as_deref()).await?;
    Ok(Json(names))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![suggest]
}
