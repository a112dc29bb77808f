#[macro_use]
extern crate rocket;

use migration::{Migrator, MigratorTrait};
use rocket::Build;

pub mod auth_utils;
pub mod controllers;
pub mod db;
pub mod entities;
pub mod errors;
pub mod fairings;
pub mod guards;
pub mod services;
pub mod validation;

/// Rocketインスタンスを構築する関数。
/// テスト時にも利用できるように分離しています。
pub async fn build_rocket() -> rocket::Rocket<Build> {
    // .envファイルを読み込む (環境変数の読み込み)
    dotenvy::dotenv().ok();

    // 1. データベース接続
    let db = db::set_up_db().await.expect("Failed to connect to DB");

    // 2. マイグレーションの実行 (起動時に自動でスキーマを揃える)
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    // 3. Rocketインスタンスの構築
    rocket::build()
        .manage(db)
        .attach(fairings::cors::Cors)
        .mount("/api", routes![preflight])
        .mount("/api", controllers::health::routes())
        .mount("/api/auth", controllers::auth::routes())
        .mount("/api/todos", controllers::todo::routes())
        .mount("/api/admin", controllers::admin::routes())
        .mount("/api/tags", controllers::tags::routes())
}

/// CORSプリフライトに200を返すためのキャッチオール。
/// 実際のCORSヘッダーはFairing側で付与される。
#[options("/<_..>")]
fn preflight() {}
