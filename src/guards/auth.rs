use rocket::request::{Outcome, Request, FromRequest};
use rocket::http::Status;
use rocket::State;
use sea_orm::*;
use crate::auth_utils::decode_token;
use crate::entities::{prelude::*, user};
use crate::entities::user::{UserRole, UserStatus};

/// 認証済みユーザーを表すリクエストガード。
/// `Authorization: Bearer <jwt>` ヘッダーを検証し、ハンドラの引数に
/// 含めるだけで自動的に認証チェックが行われます。
pub struct AuthenticatedUser {
    pub user: user::Model,
}

/// ヘッダーからBearerトークンを取り出す
fn bearer_token<'r>(request: &'r Request<'_>) -> Option<&'r str> {
    request
        .headers()
        .get_one("Authorization")
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // DBコネクションを取得
        let db = match request.guard::<&State<DatabaseConnection>>().await {
            Outcome::Success(db) => db,
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        // トークンを検証してユーザー名を取り出す
        let claims = match bearer_token(request).and_then(decode_token) {
            Some(claims) => claims,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        // トークンの発行後に無効化されたユーザーを弾くため、毎回DBを参照する
        match User::find()
            .filter(user::Column::Username.eq(claims.sub.as_str()))
            .one(db.inner())
            .await
        {
            Ok(Some(user)) if user.status == UserStatus::Active => {
                Outcome::Success(AuthenticatedUser { user })
            }
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// 管理者ユーザーのみを許可するガード。
pub struct AdminUser(pub AuthenticatedUser);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(request).await {
            Outcome::Success(auth) => {
                if auth.user.role == UserRole::Admin {
                    Outcome::Success(AdminUser(auth))
                } else {
                    Outcome::Error((Status::Forbidden, ()))
                }
            }
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}
