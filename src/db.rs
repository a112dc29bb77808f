use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// データベース接続をセットアップします。
/// 接続先は環境変数 `DATABASE_URL` で指定します (PostgreSQL / SQLite)。
pub async fn set_up_db() -> Result<DatabaseConnection, DbErr> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    // Database::connect は接続プールを自動的に作成します。
    let db = Database::connect(db_url).await?;

    Ok(db)
}
