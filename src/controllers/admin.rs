use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;

use crate::entities::user;
use crate::entities::user::UserStatus;
use crate::errors::AppError;
use crate::guards::auth::AdminUser;
use crate::services::user_service::UserService;

/// 全ユーザー一覧 (GET /api/admin/all-users)
#[get("/all-users")]
pub async fn all_users(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<Vec<user::Model>>, AppError> {
    let users = UserService::find_all(db.inner()).await?;
    Ok(Json(users))
}

/// 承認待ちユーザー一覧 (GET /api/admin/pending-users)
#[get("/pending-users")]
pub async fn pending_users(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
) -> Result<Json<Vec<user::Model>>, AppError> {
    let users = UserService::find_by_status(db.inner(), UserStatus::Pending).await?;
    Ok(Json(users))
}

/// ユーザー承認 (POST /api/admin/approve-user/<id>)
/// 対象が見つかれば状態に関わらずACTIVEへ更新する。
#[post("/approve-user/<id>")]
pub async fn approve_user(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
    id: i32,
) -> Result<(), AppError> {
    let user = UserService::find_by_id(db.inner(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    UserService::activate(db.inner(), user).await?;
    Ok(())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![all_users, pending_users, approve_user]
}
