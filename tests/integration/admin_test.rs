//! Integration tests for admin account management and sessions.

use http::StatusCode;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_super_admin_creates_admin_with_flag_overrides() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.seed_admin("root", STRONG_PASSWORD, "SUPER_ADMIN").await;
    let token = app.login_admin("root", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/admin/admins",
            Some(serde_json::json!({
                "username": "newverifier",
                "password": STRONG_PASSWORD,
                "full_name": "New Verifier",
                "role": "VERIFICATION_ADMIN",
                "capabilities": { "can_verify_clients": false }
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let caps = &response.body["data"]["capabilities"];
    // Role defaults, with the explicit override applied per-flag.
    assert_eq!(caps["can_verify_members"], true);
    assert_eq!(caps["can_verify_clients"], false);
    assert_eq!(caps["can_manage_admins"], false);
    assert_eq!(response.body["data"]["must_change_password"], true);
}

#[tokio::test]
async fn test_non_super_admin_cannot_manage_admins() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.seed_admin("verifieradmin", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifieradmin", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/admin/admins",
            Some(serde_json::json!({
                "username": "sneaky",
                "password": STRONG_PASSWORD,
                "full_name": "Sneaky",
                "role": "SUPER_ADMIN",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_self_deactivation_forbidden() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let admin_id = app.seed_admin("root2", STRONG_PASSWORD, "SUPER_ADMIN").await;
    let token = app.login_admin("root2", STRONG_PASSWORD).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/admins/{admin_id}/toggle-status"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // No row mutation occurred.
    let active: bool = sqlx::query_scalar("SELECT is_active FROM admin_users WHERE id = $1")
        .bind(admin_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert!(active);
}

#[tokio::test]
async fn test_deactivation_revokes_target_sessions() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.seed_admin("root3", STRONG_PASSWORD, "SUPER_ADMIN").await;
    let target_id = app
        .seed_admin("victim", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;

    let root_token = app.login_admin("root3", STRONG_PASSWORD).await;
    let victim_token = app.login_admin("victim", STRONG_PASSWORD).await;

    // The target's token works before deactivation.
    let response = app
        .request("GET", "/api/admin/auth/me", None, Some(&victim_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/admins/{target_id}/toggle-status"),
            None,
            Some(&root_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // The cryptographically valid token is now rejected: the session row
    // was deactivated by the cascade.
    let response = app
        .request("GET", "/api/admin/auth/me", None, Some(&victim_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.seed_admin("root4", STRONG_PASSWORD, "SUPER_ADMIN").await;
    let token = app.login_admin("root4", STRONG_PASSWORD).await;

    let response = app
        .request("POST", "/api/admin/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/admin/auth/me", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lockout_window_is_sixty_minutes() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let admin_id = app.seed_admin("root5", STRONG_PASSWORD, "SUPER_ADMIN").await;

    for _ in 0..5 {
        let response = app
            .request(
                "POST",
                "/api/admin/auth/login",
                Some(serde_json::json!({ "username": "root5", "password": "nope" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let locked_minutes: Option<f64> = sqlx::query_scalar(
        "SELECT (EXTRACT(EPOCH FROM (locked_until - NOW())) / 60.0)::double precision \
         FROM admin_users WHERE id = $1",
    )
    .bind(admin_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    let minutes = locked_minutes.expect("admin should be locked");
    assert!((58.0..=60.5).contains(&minutes), "lock was {minutes} minutes");
}

#[tokio::test]
async fn test_audit_log_search_by_action() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.seed_admin("root6", STRONG_PASSWORD, "SUPER_ADMIN").await;
    let token = app.login_admin("root6", STRONG_PASSWORD).await;

    // Login itself is audited.
    let response = app
        .request(
            "GET",
            "/api/admin/audit-log?action=LOGIN",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert_eq!(items[0]["action"], "LOGIN");
}
