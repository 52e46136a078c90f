//! Integration tests for the verification state machine.

use http::StatusCode;

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_end_to_end_member_approval() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012345678", STRONG_PASSWORD).await;
    assert_eq!(app.verification_status(user_id).await, "PENDING");

    let admin_id = app
        .seed_admin("verifier", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifier", STRONG_PASSWORD).await;

    // Start review: PENDING -> UNDER_REVIEW with a start timestamp.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/start-review"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.verification_status(user_id).await, "UNDER_REVIEW");

    let started: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT verification_started_at FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert!(started.is_some());

    // Approve with no notes.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/approve"),
            Some(serde_json::json!({})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.verification_status(user_id).await, "VERIFIED");

    // Exactly one VERIFICATION_APPROVED notification.
    let notifications: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications \
         WHERE user_id = $1 AND kind = 'VERIFICATION_APPROVED'",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(notifications, 1);

    // Exactly one member-approval audit row naming the admin and the user.
    let audits: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM admin_activity_log \
         WHERE admin_id = $1 AND target_id = $2 AND action = 'MEMBER_VERIFICATION_APPROVED'",
    )
    .bind(admin_id)
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(audits, 1);
}

#[tokio::test]
async fn test_start_review_from_verified_is_state_conflict() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340001", STRONG_PASSWORD).await;
    app.seed_admin("verifier2", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifier2", STRONG_PASSWORD).await;

    app.request(
        "POST",
        &format!("/api/admin/verification/{user_id}/approve"),
        Some(serde_json::json!({})),
        Some(&token),
    )
    .await;
    assert_eq!(app.verification_status(user_id).await, "VERIFIED");

    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/start-review"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "STATE_CONFLICT");
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("VERIFIED")
    );
}

#[tokio::test]
async fn test_approve_bulk_approves_pending_documents() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340002", STRONG_PASSWORD).await;

    for doc_type in ["NIN", "TRADE_CERTIFICATE"] {
        sqlx::query(
            "INSERT INTO verification_documents (user_id, document_type, document_url) \
             VALUES ($1, $2, 'https://img.example/doc.jpg')",
        )
        .bind(user_id)
        .bind(doc_type)
        .execute(&app.db_pool)
        .await
        .unwrap();
    }

    app.seed_admin("verifier3", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifier3", STRONG_PASSWORD).await;

    app.request(
        "POST",
        &format!("/api/admin/verification/{user_id}/approve"),
        Some(serde_json::json!({ "notes": "all good" })),
        Some(&token),
    )
    .await;

    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM verification_documents \
         WHERE user_id = $1 AND verification_status <> 'APPROVED'",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(pending, 0);
}

#[tokio::test]
async fn test_reject_twice_produces_one_notification_per_call() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340003", STRONG_PASSWORD).await;
    app.seed_admin("verifier4", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifier4", STRONG_PASSWORD).await;

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                &format!("/api/admin/verification/{user_id}/reject"),
                Some(serde_json::json!({
                    "reason": "Blurry documents",
                    "details": "The NIN photo is unreadable",
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    assert_eq!(app.verification_status(user_id).await, "REJECTED");

    let notifications: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications \
         WHERE user_id = $1 AND kind = 'VERIFICATION_REJECTED'",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(notifications, 2);
}

#[tokio::test]
async fn test_resubmission_cycle() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340004", STRONG_PASSWORD).await;
    app.seed_admin("verifier5", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let admin_token = app.login_admin("verifier5", STRONG_PASSWORD).await;

    // Admin requests resubmission: status lands in REJECTED with the
    // fixed reason marker.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/request-resubmission"),
            Some(serde_json::json!({ "reason": "Upload a clearer NIN photo" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.verification_status(user_id).await, "REJECTED");

    let reason: Option<String> =
        sqlx::query_scalar("SELECT rejection_reason FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(reason.as_deref(), Some("Resubmission Required"));

    // The user resubmits new documents and returns to the queue.
    let user_token = app.login_user("08012340004", STRONG_PASSWORD).await;
    let response = app
        .request(
            "POST",
            "/api/auth/resubmit-documents",
            Some(serde_json::json!({
                "documents": [
                    { "document_type": "NIN", "document_url": "https://img.example/nin2.jpg" }
                ]
            })),
            Some(&user_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.verification_status(user_id).await, "RESUBMITTED");

    // Review can start again from RESUBMITTED.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/start-review"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.verification_status(user_id).await, "UNDER_REVIEW");
}

#[tokio::test]
async fn test_suspend_terminates_sessions_and_reactivate_restores() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340005", STRONG_PASSWORD).await;
    let user_token = app.login_user("08012340005", STRONG_PASSWORD).await;

    app.seed_admin("verifier6", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let admin_token = app.login_admin("verifier6", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/suspend"),
            Some(serde_json::json!({ "reason": "Fraud report under investigation" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(app.verification_status(user_id).await, "SUSPENDED");

    // The user's still-unexpired token no longer works.
    let response = app.request("GET", "/api/auth/me", None, Some(&user_token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let active_sessions: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_sessions WHERE user_id = $1 AND is_active = TRUE",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(active_sessions, 0);

    // Reactivation always lands in VERIFIED.
    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/reactivate"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.verification_status(user_id).await, "VERIFIED");
}

#[tokio::test]
async fn test_verification_requires_matching_capability() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340006", STRONG_PASSWORD).await;

    // A content admin has neither verification flag.
    app.seed_admin("contentadmin", STRONG_PASSWORD, "CONTENT_ADMIN")
        .await;
    let token = app.login_admin("contentadmin", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/verification/{user_id}/start-review"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.verification_status(user_id).await, "PENDING");
}

#[tokio::test]
async fn test_document_review_leaves_parent_status_alone() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let user_id = app.register_member("08012340007", STRONG_PASSWORD).await;
    let doc_id: uuid::Uuid = sqlx::query_scalar(
        "INSERT INTO verification_documents (user_id, document_type, document_url) \
         VALUES ($1, 'NIN', 'https://img.example/nin.jpg') RETURNING id",
    )
    .bind(user_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();

    app.seed_admin("verifier7", STRONG_PASSWORD, "VERIFICATION_ADMIN")
        .await;
    let token = app.login_admin("verifier7", STRONG_PASSWORD).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/verification/documents/{doc_id}"),
            Some(serde_json::json!({ "status": "APPROVED" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["verification_status"], "APPROVED");

    // Account-level status is untouched.
    assert_eq!(app.verification_status(user_id).await, "PENDING");
}
