//! Route definitions for the Agrolink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(member_routes())
        .merge(listing_routes())
        .merge(rating_routes())
        .merge(transaction_routes())
        .merge(notification_routes())
        .merge(upload_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    // Error-path rewriting sits inside compression so it sees plain JSON.
    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(
            middleware::error_context::attach_error_path,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: registration, login, refresh, self-service.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register/member", post(handlers::auth::register_member))
        .route("/auth/register/client", post(handlers::auth::register_client))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/password", put(handlers::auth::change_password))
        .route(
            "/auth/password-reset",
            post(handlers::auth::request_password_reset),
        )
        .route(
            "/auth/resubmit-documents",
            post(handlers::auth::resubmit_documents),
        )
}

/// Member directory and profile endpoints.
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(handlers::member::browse))
        .route("/members/{id}", get(handlers::member::get_member))
        .route("/members/me", put(handlers::member::update_my_member_profile))
        .route("/clients/me", put(handlers::member::update_my_client_profile))
}

/// Listing CRUD and browse for products, services, and tools.
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::product::browse))
        .route("/products", post(handlers::product::create_product))
        .route("/products/{id}", get(handlers::product::get_product))
        .route("/products/{id}", put(handlers::product::update_product))
        .route("/products/{id}", delete(handlers::product::deactivate_product))
        .route("/services", get(handlers::service_offering::browse))
        .route("/services", post(handlers::service_offering::create_service))
        .route("/services/{id}", get(handlers::service_offering::get_service))
        .route("/services/{id}", put(handlers::service_offering::update_service))
        .route(
            "/services/{id}",
            delete(handlers::service_offering::deactivate_service),
        )
        .route("/tools", get(handlers::tool::browse))
        .route("/tools", post(handlers::tool::create_tool))
        .route("/tools/{id}", get(handlers::tool::get_tool))
        .route("/tools/{id}", put(handlers::tool::update_tool))
        .route("/tools/{id}", delete(handlers::tool::deactivate_tool))
}

/// Rating endpoints.
fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/ratings", post(handlers::rating::submit))
        .route("/ratings/member/{id}", get(handlers::rating::for_member))
        .route("/ratings/given", get(handlers::rating::given))
        .route("/ratings/received", get(handlers::rating::received))
}

/// Transaction endpoints.
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(handlers::transaction::create))
        .route("/transactions", get(handlers::transaction::list_mine))
        .route(
            "/transactions/{id}/status",
            put(handlers::transaction::advance),
        )
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Image upload endpoint.
fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(handlers::upload::upload))
}

/// Admin endpoints: auth, verification, accounts, users, resets,
/// moderation, dashboard, and the audit log.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/auth/login", post(handlers::admin::auth::login))
        .route("/admin/auth/logout", post(handlers::admin::auth::logout))
        .route(
            "/admin/auth/terminate-sessions",
            post(handlers::admin::auth::terminate_sessions),
        )
        .route("/admin/auth/me", get(handlers::admin::auth::me))
        .route(
            "/admin/auth/password",
            put(handlers::admin::auth::change_password),
        )
        .route(
            "/admin/verification/pending",
            get(handlers::admin::verification::pending),
        )
        .route(
            "/admin/verification/under-review",
            get(handlers::admin::verification::under_review),
        )
        .route(
            "/admin/verification/{user_id}",
            get(handlers::admin::verification::detail),
        )
        .route(
            "/admin/verification/{user_id}/start-review",
            post(handlers::admin::verification::start_review),
        )
        .route(
            "/admin/verification/{user_id}/approve",
            post(handlers::admin::verification::approve),
        )
        .route(
            "/admin/verification/{user_id}/reject",
            post(handlers::admin::verification::reject),
        )
        .route(
            "/admin/verification/{user_id}/request-resubmission",
            post(handlers::admin::verification::request_resubmission),
        )
        .route(
            "/admin/verification/documents/{document_id}",
            put(handlers::admin::verification::verify_document),
        )
        .route(
            "/admin/verification/{user_id}/suspend",
            post(handlers::admin::verification::suspend),
        )
        .route(
            "/admin/verification/{user_id}/reactivate",
            post(handlers::admin::verification::reactivate),
        )
        .route("/admin/admins", get(handlers::admin::accounts::list))
        .route("/admin/admins", post(handlers::admin::accounts::create))
        .route("/admin/admins/{id}", put(handlers::admin::accounts::update))
        .route(
            "/admin/admins/{id}/toggle-status",
            put(handlers::admin::accounts::toggle_status),
        )
        .route(
            "/admin/admins/{id}/password",
            put(handlers::admin::accounts::reset_password),
        )
        .route("/admin/users", get(handlers::admin::users::list))
        .route("/admin/users/{id}", get(handlers::admin::users::get_user))
        .route(
            "/admin/users/{id}/password",
            put(handlers::admin::resets::reset_user_password),
        )
        .route(
            "/admin/password-resets",
            get(handlers::admin::resets::pending),
        )
        .route(
            "/admin/password-resets/{id}/process",
            post(handlers::admin::resets::process),
        )
        .route(
            "/admin/password-resets/{id}/reject",
            post(handlers::admin::resets::reject),
        )
        .route(
            "/admin/ratings/{id}/moderate",
            put(handlers::admin::moderation::moderate_rating),
        )
        .route(
            "/admin/products/{id}/visibility",
            put(handlers::admin::moderation::set_product_visibility),
        )
        .route("/admin/dashboard", get(handlers::admin::dashboard::overview))
        .route(
            "/admin/dashboard/verification-stats",
            get(handlers::admin::dashboard::verification_stats),
        )
        .route("/admin/audit-log", get(handlers::admin::audit::search))
}

/// Health endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
