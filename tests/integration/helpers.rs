//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use agrolink_api::AppState;
use agrolink_core::config::AppConfig;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries and assertions.
    pub db_pool: PgPool,
}

/// A captured test response.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body was not JSON).
    pub body: Value,
}

impl TestApp {
    /// Create a test application, or `None` when no test database is
    /// configured.
    pub async fn try_new() -> Option<Self> {
        let Ok(db_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("skipping: TEST_DATABASE_URL not set");
            return None;
        };

        let mut config = AppConfig::load("test").expect("Failed to load config");
        config.database.url = db_url;
        config.storage.provider = "local".to_string();
        config.storage.local_root = std::env::temp_dir()
            .join("agrolink-test-uploads")
            .to_string_lossy()
            .to_string();

        let db_pool = agrolink_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        agrolink_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = AppState::build(Arc::new(config), db_pool.clone())
            .await
            .expect("Failed to build state");
        let router = agrolink_api::router::build_router(state);

        Some(Self { router, db_pool })
    }

    /// Truncate all tables so each test starts from a clean slate.
    async fn clean_database(pool: &PgPool) {
        sqlx::query(
            "TRUNCATE admin_activity_log, notifications, transactions, ratings, tools, \
             service_offerings, products, password_reset_requests, user_sessions, \
             admin_sessions, verification_documents, client_profiles, member_profiles, \
             admin_users, users CASCADE",
        )
        .execute(pool)
        .await
        .expect("Failed to clean database");
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a member via the API and return the user id.
    pub async fn register_member(&self, phone: &str, password: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register/member",
                Some(serde_json::json!({
                    "phone_number": phone,
                    "password": password,
                    "full_name": "Test Member",
                    "provider_type": "CROP_FARMER",
                    "local_government_area": "Ikeja",
                    "state": "Lagos",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        Uuid::parse_str(response.body["data"]["id"].as_str().unwrap()).unwrap()
    }

    /// Register a client via the API and return the user id.
    pub async fn register_client(&self, phone: &str, password: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register/client",
                Some(serde_json::json!({
                    "phone_number": phone,
                    "password": password,
                    "full_name": "Test Client",
                    "state": "Lagos",
                    "local_government_area": "Ikeja",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        Uuid::parse_str(response.body["data"]["id"].as_str().unwrap()).unwrap()
    }

    /// Log a user in, returning the access token.
    pub async fn login_user(&self, phone: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "phone_number": phone, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Seed an admin account directly, with the role's default
    /// capability flags, and return its id.
    pub async fn seed_admin(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hasher = agrolink_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).unwrap();
        let role: agrolink_entity::admin::AdminRole = role.parse().unwrap();
        let caps = role.default_capabilities();

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO admin_users (username, password_hash, full_name, role, \
                                      can_verify_members, can_verify_clients, can_reset_passwords, \
                                      can_manage_content, can_manage_events, can_manage_admins, \
                                      can_export_data, can_access_reports) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING id",
        )
        .bind(username)
        .bind(&hash)
        .bind("Test Admin")
        .bind(role)
        .bind(caps.can_verify_members)
        .bind(caps.can_verify_clients)
        .bind(caps.can_reset_passwords)
        .bind(caps.can_manage_content)
        .bind(caps.can_manage_events)
        .bind(caps.can_manage_admins)
        .bind(caps.can_export_data)
        .bind(caps.can_access_reports)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to seed admin")
    }

    /// Log an admin in, returning the token.
    pub async fn login_admin(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/admin/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["data"]["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Read a user's verification status straight from the database.
    pub async fn verification_status(&self, user_id: Uuid) -> String {
        sqlx::query_scalar::<_, String>(
            "SELECT verification_status::text FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to read status")
    }
}

/// A password that satisfies the policy (length, classes, entropy).
pub const STRONG_PASSWORD: &str = "Tr4ctor-Harvest-9";
