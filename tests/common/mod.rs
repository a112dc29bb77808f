use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;
use std::future::Future;
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use todo_backend::build_rocket;

// Ensure environment setup runs only once per test binary
static INIT: Once = Once::new();

/// テスト用のデフォルトDB。
/// DATABASE_URL が未設定のときだけ使う使い捨てのSQLiteファイル。
const TEST_DB_FILE: &str = "target/todo_backend_test.sqlite";

pub fn setup() -> Client {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();

        if std::env::var("DATABASE_URL").is_err() {
            // Start from a clean file so earlier runs don't leak state.
            let _ = std::fs::remove_file(TEST_DB_FILE);
            std::env::set_var("DATABASE_URL", format!("sqlite://{}?mode=rwc", TEST_DB_FILE));
        }

        // マイグレーションはここで一度だけ流しておく。
        // build_rocket() 内の Migrator::up は以降no-opになるので、
        // 並列に走るテスト同士がマイグレーションで競合しない。
        run(async {
            let db = Database::connect(std::env::var("DATABASE_URL").unwrap())
                .await
                .expect("Failed to connect to test DB");
            Migrator::up(&db, None)
                .await
                .expect("Failed to run migrations");
        });
    });

    let rocket = run(async { build_rocket().await });

    Client::tracked(rocket).expect("valid rocket instance")
}

/// Block on an async block from a sync test.
pub fn run<F: Future>(future: F) -> F::Output {
    rocket::tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

use todo_backend::auth_utils::hash_password;
use todo_backend::entities::user::{self, UserRole, UserStatus};
use todo_backend::entities::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

/// 重複しないユーザー名・タグ名を作る
pub fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}{}", prefix, nanos)
}

/// `admin` / `password` でログインできる管理者を保証する。
/// マイグレーションのシード値に依存しないよう、既存ならパスワードを上書きする。
pub fn create_test_admin(client: &Client) -> user::Model {
    upsert_user(client, "admin", "password", UserRole::Admin, UserStatus::Active)
}

/// 承認済みの一般ユーザーを作成する (パスワードは "password123")
pub fn create_active_user(client: &Client, username: &str) -> user::Model {
    upsert_user(client, username, "password123", UserRole::User, UserStatus::Active)
}

fn upsert_user(
    client: &Client,
    username: &str,
    password: &str,
    role: UserRole,
    status: UserStatus,
) -> user::Model {
    let db = client.rocket().state::<DatabaseConnection>().unwrap();
    let password_hash = hash_password(password).unwrap();

    run(async {
        if let Some(existing) = User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
            .unwrap()
        {
            let mut active_model: user::ActiveModel = existing.into();
            active_model.password_hash = Set(password_hash);
            active_model.role = Set(role);
            active_model.status = Set(status);
            return active_model.update(db).await.unwrap();
        }

        let active_user = user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash),
            role: Set(role),
            status: Set(status),
            ..Default::default()
        };

        // Insert or fetch if failed (race with a parallel test)
        match active_user.insert(db).await {
            Ok(u) => u,
            Err(_) => User::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
                .unwrap()
                .unwrap(),
        }
    })
}

/// ログインしてBearerトークンを取得する
pub fn login(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(
            serde_json::json!({
                "username": username,
                "password": password,
            })
            .to_string(),
        )
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let token = response.into_string().unwrap();
    assert!(!token.is_empty());
    token
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {}", token))
}
