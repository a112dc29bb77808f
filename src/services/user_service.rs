use sea_orm::*;
use crate::entities::{prelude::*, user};
use crate::entities::user::{UserRole, UserStatus};
use crate::auth_utils::{hash_password, verify_password};
use crate::errors::AppError;

/// ユーザー関連のビジネスロジックを集約するサービス。
pub struct UserService;

impl UserService {
    /// IDでユーザーを検索
    pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<user::Model>, AppError> {
        User::find_by_id(id)
            .one(db)
            .await
            .map_err(AppError::Database)
    }

    /// ユーザー名で検索
    pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<user::Model>, AppError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
            .map_err(AppError::Database)
    }

    /// 全ユーザー取得 (管理画面用)
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<user::Model>, AppError> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
            .map_err(AppError::Database)
    }

    /// 指定ステータスのユーザー一覧 (承認待ち一覧など)
    pub async fn find_by_status(db: &DatabaseConnection, status: UserStatus) -> Result<Vec<user::Model>, AppError> {
        User::find()
            .filter(user::Column::Status.eq(status))
            .order_by_asc(user::Column::Id)
            .all(db)
            .await
            .map_err(AppError::Database)
    }

    /// ユーザー登録。作成されたユーザーは承認待ち (PENDING) になる
    pub async fn register(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        if Self::find_by_username(db, username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(password)?;

        let new_user = user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash),
            role: Set(UserRole::User),
            status: Set(UserStatus::Pending),
            ..Default::default()
        };

        let user = new_user.insert(db).await.map_err(AppError::Database)?;
        log::info!("Registered user '{}' (pending approval)", user.username);
        Ok(user)
    }

    /// 認証処理。
    /// ユーザー不在・パスワード不一致・未承認アカウントはいずれも
    /// 同じエラーにまとめ、アカウントの状態を外部に漏らさない。
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<user::Model, AppError> {
        let user = Self::find_by_username(db, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        if user.status != UserStatus::Active {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// パスワードを再設定する
    pub async fn reset_password(
        db: &DatabaseConnection,
        username: &str,
        new_password: &str,
    ) -> Result<user::Model, AppError> {
        let user = Self::find_by_username(db, username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let mut active_model: user::ActiveModel = user.into();
        active_model.password_hash = Set(hash_password(new_password)?);

        let user = active_model.update(db).await.map_err(AppError::Database)?;
        log::info!("Password reset for user '{}'", user.username);
        Ok(user)
    }

    /// ユーザーを承認してACTIVEにする
    pub async fn activate(db: &DatabaseConnection, user: user::Model) -> Result<user::Model, AppError> {
        let username = user.username.clone();
        let mut active_model: user::ActiveModel = user.into();
        active_model.status = Set(UserStatus::Active);

        let user = active_model.update(db).await.map_err(AppError::Database)?;
        log::info!("Approved user '{}'", username);
        Ok(user)
    }
}
