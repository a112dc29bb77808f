use rocket::http::{ContentType, Status};

mod common;

fn register_body(username: &str, password: &str) -> String {
    serde_json::json!({ "username": username, "password": password }).to_string()
}

#[test]
fn test_register_returns_created() {
    let client = common::setup();
    let username = common::unique_name("newuser");

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();

    assert_eq!(response.status(), Status::Created);
    let body = response.into_string().unwrap();
    assert!(body.contains("User registered successfully"));
}

#[test]
fn test_register_duplicate_username_conflict() {
    let client = common::setup();
    let username = common::unique_name("dupuser");

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Created);

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(response.into_string().unwrap(), "Username already exists");
}

#[test]
fn test_register_rejects_short_password() {
    let client = common::setup();
    let username = common::unique_name("shortpw");

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "short"))
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    assert!(response.into_string().unwrap().contains("at least 8 characters"));
}

#[test]
fn test_register_rejects_invalid_username_chars() {
    let client = common::setup();

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body("invalid user!", "password123"))
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn test_login_returns_token() {
    let client = common::setup();
    let username = common::unique_name("loginuser");
    common::create_active_user(&client, &username);

    // common::login asserts 200 and a non-empty body
    let token = common::login(&client, &username, "password123");
    // JWTはヘッダ・ペイロード・署名の3パート
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_login_with_wrong_password_unauthorized() {
    let client = common::setup();
    let username = common::unique_name("wrongpw");
    common::create_active_user(&client, &username);

    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(register_body(&username, "not-the-password"))
        .dispatch();

    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(response.into_string().unwrap(), "Invalid username or password");
}

#[test]
fn test_pending_user_cannot_login() {
    let client = common::setup();
    let username = common::unique_name("pending");

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Created);

    // 承認前はログイン不可。文言は資格情報エラーと同じ
    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(response.into_string().unwrap(), "Invalid username or password");
}

#[test]
fn test_registration_approval_login_flow() {
    let client = common::setup();
    common::create_test_admin(&client);
    let username = common::unique_name("approved");

    // 1. Register (PENDING)
    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Created);

    // 2. Approve as admin (by username)
    let admin_token = common::login(&client, "admin", "password");
    let response = client
        .post(format!("/api/auth/approve/{}", username))
        .header(common::bearer(&admin_token))
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().unwrap(), "User approved successfully");

    // 3. Now the user can log in
    common::login(&client, &username, "password123");
}

#[test]
fn test_approve_is_admin_only() {
    let client = common::setup();
    let username = common::unique_name("plain");
    common::create_active_user(&client, &username);
    let token = common::login(&client, &username, "password123");

    let response = client
        .post(format!("/api/auth/approve/{}", username))
        .header(common::bearer(&token))
        .dispatch();

    assert_eq!(response.status(), Status::Forbidden);
}

#[test]
fn test_approve_active_user_conflict() {
    let client = common::setup();
    common::create_test_admin(&client);
    let username = common::unique_name("alreadyactive");
    common::create_active_user(&client, &username);

    let admin_token = common::login(&client, "admin", "password");
    let response = client
        .post(format!("/api/auth/approve/{}", username))
        .header(common::bearer(&admin_token))
        .dispatch();

    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(response.into_string().unwrap(), "User is not pending");
}

#[test]
fn test_password_reset_flow() {
    let client = common::setup();
    let username = common::unique_name("resetme");
    common::create_active_user(&client, &username);

    let response = client
        .post("/api/auth/reset-password")
        .header(ContentType::JSON)
        .body(
            serde_json::json!({ "username": username, "newPassword": "changed-secret" })
                .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains(&format!("Password has been reset for {}", username)));

    // Old password no longer works
    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(register_body(&username, "password123"))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    // New one does
    common::login(&client, &username, "changed-secret");
}

#[test]
fn test_forgot_password_behaves_like_reset() {
    let client = common::setup();
    let username = common::unique_name("forgot");
    common::create_active_user(&client, &username);

    let response = client
        .post("/api/auth/forgot-password")
        .header(ContentType::JSON)
        .body(
            serde_json::json!({ "username": username, "newPassword": "another-secret" })
                .to_string(),
        )
        .dispatch();
    assert_eq!(response.status(), Status::Ok);

    common::login(&client, &username, "another-secret");
}

#[test]
fn test_reset_password_unknown_user_not_found() {
    let client = common::setup();

    let response = client
        .post("/api/auth/reset-password")
        .header(ContentType::JSON)
        .body(
            serde_json::json!({ "username": "no-such-user-ever", "newPassword": "whatever123" })
                .to_string(),
        )
        .dispatch();

    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(response.into_string().unwrap(), "User not found");
}

#[test]
fn test_reset_password_missing_fields_bad_request() {
    let client = common::setup();

    let response = client
        .post("/api/auth/reset-password")
        .header(ContentType::JSON)
        .body(serde_json::json!({ "username": "someone" }).to_string())
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(
        response.into_string().unwrap(),
        "Username and new password required."
    );
}
