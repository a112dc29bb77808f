use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth_utils::generate_token;
use crate::entities::user::UserStatus;
use crate::errors::AppError;
use crate::guards::auth::AdminUser;
use crate::services::user_service::UserService;
use crate::validation::RegisterValidation;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// パスワード再設定リクエスト。
/// どちらかのフィールドが欠けている場合は400を返すため Option で受ける。
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub username: Option<String>,
    pub new_password: Option<String>,
}

/// ユーザー登録 (POST /api/auth/register)
/// 作成されたアカウントは管理者が承認するまでログインできない。
#[post("/register", data = "<request>")]
pub async fn register(
    db: &State<DatabaseConnection>,
    request: Json<RegisterRequest>,
) -> Result<Custom<&'static str>, AppError> {
    RegisterValidation::new(&request.username, &request.password)
        .validate_form()
        .map_err(|messages| AppError::BadRequest(messages.join(", ")))?;

    UserService::register(db.inner(), &request.username, &request.password).await?;

    Ok(Custom(
        Status::Created,
        "User registered successfully. Pending approval by admin.",
    ))
}

/// ログイン (POST /api/auth/login)
/// 成功時はJWTをプレーンテキストで返す。
#[post("/login", data = "<request>")]
pub async fn login(
    db: &State<DatabaseConnection>,
    request: Json<LoginRequest>,
) -> Result<String, AppError> {
    let user = UserService::authenticate(db.inner(), &request.username, &request.password).await?;

    let token = generate_token(&user.username, user.role)?;
    Ok(token)
}

/// 共通のパスワード再設定処理
async fn apply_password_reset(
    db: &DatabaseConnection,
    request: &PasswordResetRequest,
) -> Result<String, AppError> {
    let (username, new_password) = match (&request.username, &request.new_password) {
        (Some(username), Some(new_password)) => (username, new_password),
        _ => {
            return Err(AppError::BadRequest(
                "Username and new password required.".to_string(),
            ))
        }
    };

    let user = UserService::reset_password(db, username, new_password).await?;
    Ok(format!("Password has been reset for {}", user.username))
}

/// パスワード再設定 (POST /api/auth/reset-password)
#[post("/reset-password", data = "<request>")]
pub async fn reset_password(
    db: &State<DatabaseConnection>,
    request: Json<PasswordResetRequest>,
) -> Result<String, AppError> {
    apply_password_reset(db.inner(), &request).await
}

/// パスワード再設定 (POST /api/auth/forgot-password)
/// reset-password と同じ処理。フロントエンドの2つの導線が両方このAPIに到達する。
#[post("/forgot-password", data = "<request>")]
pub async fn forgot_password(
    db: &State<DatabaseConnection>,
    request: Json<PasswordResetRequest>,
) -> Result<String, AppError> {
    apply_password_reset(db.inner(), &request).await
}

/// ユーザー名指定での承認 (POST /api/auth/approve/<username>) — 管理者のみ
#[post("/approve/<username>")]
pub async fn approve(
    db: &State<DatabaseConnection>,
    _admin: AdminUser,
    username: &str,
) -> Result<&'static str, AppError> {
    let user = UserService::find_by_username(db.inner(), username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.status != UserStatus::Pending {
        return Err(AppError::Conflict("User is not pending".to_string()));
    }

    UserService::activate(db.inner(), user).await?;
    Ok("User approved successfully")
}

pub fn routes() -> Vec<rocket::Route> {
    routes![register, login, reset_password, forgot_password, approve]
}
