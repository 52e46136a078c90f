//! Integration tests for registration, login, and lockout.

use http::StatusCode;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_register_member_lands_in_pending() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012345678", STRONG_PASSWORD).await;
    assert_eq!(app.verification_status(user_id).await, "PENDING");
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.register_member("08011110001", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register/client",
            Some(serde_json::json!({
                "phone_number": "08011110001",
                "password": STRONG_PASSWORD,
                "full_name": "Dup Client",
                "state": "Lagos",
                "local_government_area": "Ikeja",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_login_success_and_me() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.register_member("08011110002", STRONG_PASSWORD).await;
    let token = app.login_user("08011110002", STRONG_PASSWORD).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["phone_number"], "08011110002");
    assert_eq!(response.body["data"]["verification_status"], "PENDING");
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.register_member("08011110003", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "phone_number": "08011110003",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lockout_after_five_failures() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08011110004", STRONG_PASSWORD).await;

    for _ in 0..5 {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "phone_number": "08011110004",
                    "password": "wrong-password",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // Lock expiry roughly 30 minutes out.
    let locked_minutes: Option<f64> = sqlx::query_scalar(
        "SELECT (EXTRACT(EPOCH FROM (locked_until - NOW())) / 60.0)::double precision \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    let minutes = locked_minutes.expect("account should be locked");
    assert!((28.0..=30.5).contains(&minutes), "lock was {minutes} minutes");

    // Sixth attempt fails citing the lock, even with the right password,
    // and does not move the counter.
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "phone_number": "08011110004",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("locked"),
        "{:?}",
        response.body
    );

    let attempts: i32 =
        sqlx::query_scalar("SELECT failed_login_attempts FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(attempts, 5);
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.register_client("08011110005", STRONG_PASSWORD).await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "phone_number": "08011110005",
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    let refresh_token = login.body["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());

    // An access token is not accepted as a refresh token.
    let access_token = login.body["data"]["access_token"].as_str().unwrap();
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_body_carries_path() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["path"], "/api/auth/me");
    assert_eq!(response.body["success"], false);
}
