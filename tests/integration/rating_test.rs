//! Integration tests for rating aggregation and moderation.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{STRONG_PASSWORD, TestApp};

/// Register, approve, and log in one member plus N clients; returns the
/// member profile id, the member's admin token, and the client tokens.
async fn setup_rated_member(
    app: &TestApp,
    client_count: usize,
) -> (Uuid, String, Vec<String>) {
    app.seed_admin("ratingadmin", STRONG_PASSWORD, "SUPER_ADMIN")
        .await;
    let admin_token = app.login_admin("ratingadmin", STRONG_PASSWORD).await;

    let member_user = app.register_member("08020000000", STRONG_PASSWORD).await;
    app.request(
        "POST",
        &format!("/api/admin/verification/{member_user}/approve"),
        Some(serde_json::json!({})),
        Some(&admin_token),
    )
    .await;

    let member_profile: Uuid =
        sqlx::query_scalar("SELECT id FROM member_profiles WHERE user_id = $1")
            .bind(member_user)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();

    let mut client_tokens = Vec::new();
    for i in 0..client_count {
        let phone = format!("0802111{i:04}");
        let client_user = app.register_client(&phone, STRONG_PASSWORD).await;
        app.request(
            "POST",
            &format!("/api/admin/verification/{client_user}/approve"),
            Some(serde_json::json!({})),
            Some(&admin_token),
        )
        .await;
        client_tokens.push(app.login_user(&phone, STRONG_PASSWORD).await);
    }

    (member_profile, admin_token, client_tokens)
}

async fn submit_rating(app: &TestApp, token: &str, member_id: Uuid, stars: i32) {
    let response = app
        .request(
            "POST",
            "/api/ratings",
            Some(serde_json::json!({
                "member_id": member_id,
                "rating_category": "GENERAL",
                "overall_rating": stars,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
async fn test_aggregates_recomputed_over_active_ratings() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (member_id, admin_token, clients) = setup_rated_member(&app, 5).await;

    for (token, stars) in clients.iter().zip([5, 5, 4, 3, 5]) {
        submit_rating(&app, token, member_id, stars).await;
    }

    let (avg, total, five, four, three): (f32, i32, i32, i32, i32) = sqlx::query_as(
        "SELECT average_rating, total_ratings, five_star_count, four_star_count, \
                three_star_count \
         FROM member_profiles WHERE id = $1",
    )
    .bind(member_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();

    assert!((avg - 4.4).abs() < 0.001, "average was {avg}");
    assert_eq!(total, 5);
    assert_eq!(five, 3);
    assert_eq!(four, 1);
    assert_eq!(three, 1);

    // Hiding one 5-star rating drops the aggregate with no decrement path.
    let rating_id: Uuid = sqlx::query_scalar(
        "SELECT id FROM ratings WHERE member_id = $1 AND overall_rating = 5 LIMIT 1",
    )
    .bind(member_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/ratings/{rating_id}/moderate"),
            Some(serde_json::json!({ "status": "HIDDEN", "reason": "abusive text" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let (avg, total, five): (f32, i32, i32) = sqlx::query_as(
        "SELECT average_rating, total_ratings, five_star_count \
         FROM member_profiles WHERE id = $1",
    )
    .bind(member_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();

    assert_eq!(total, 4);
    assert_eq!(five, 2);
    assert!((avg - 4.25).abs() < 0.001, "average was {avg}");

    // Moderation is audited.
    let audits: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM admin_activity_log WHERE action = 'RATING_MODERATED'",
    )
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(audits, 1);
}

#[tokio::test]
async fn test_duplicate_rating_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (member_id, _admin_token, clients) = setup_rated_member(&app, 1).await;
    let token = &clients[0];

    submit_rating(&app, token, member_id, 4).await;

    let response = app
        .request(
            "POST",
            "/api/ratings",
            Some(serde_json::json!({
                "member_id": member_id,
                "rating_category": "GENERAL",
                "overall_rating": 5,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unverified_client_cannot_rate() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let (member_id, _admin_token, _clients) = setup_rated_member(&app, 0).await;

    // A fresh, PENDING client.
    app.register_client("08029999999", STRONG_PASSWORD).await;
    let token = app.login_user("08029999999", STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/ratings",
            Some(serde_json::json!({
                "member_id": member_id,
                "rating_category": "GENERAL",
                "overall_rating": 5,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
