use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use crate::entities::user::UserRole;

/// トークンの有効期限（秒）
const TOKEN_EXPIRY_SECS: i64 = 60 * 60 * 24; // 24時間

/// パスワードをArgon2でハッシュ化します。
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(hash)
}

/// パスワードを検証します。
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match argon2::PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// JWTのペイロード。
/// `sub` はユーザー名、`role` は発行時点の権限です。
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    pub exp: i64,
}

fn jwt_secret() -> String {
    // 本番では必ず JWT_SECRET を設定すること
    env::var("JWT_SECRET").unwrap_or_else(|_| "insecure-dev-secret-change-me".to_string())
}

/// ログイン成功時に返すBearerトークンを発行します。
pub fn generate_token(username: &str, role: UserRole) -> Result<String> {
    let claims = Claims {
        sub: username.to_owned(),
        role,
        exp: chrono::Utc::now().timestamp() + TOKEN_EXPIRY_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
}

/// トークンを検証し、有効であればペイロードを返します。
/// 署名不正・期限切れは None。
pub fn decode_token(token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}
