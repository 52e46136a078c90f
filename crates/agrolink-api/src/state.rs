//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use agrolink_auth::jwt::{AdminTokenVerifier, UserTokenVerifier};
use agrolink_auth::session::AdminSessionManager;
use agrolink_core::config::AppConfig;
use agrolink_database::repositories::admin::AdminRepository;
use agrolink_database::repositories::user::UserRepository;
use agrolink_service::admin::{AdminAccountService, AdminAuthService};
use agrolink_service::auth::AuthService;
use agrolink_service::dashboard::DashboardService;
use agrolink_service::listing::ListingService;
use agrolink_service::notification::NotificationService;
use agrolink_service::rating::RatingService;
use agrolink_service::transaction::TransactionService;
use agrolink_service::user::UserService;
use agrolink_service::verification::{PasswordResetService, VerificationService};
use agrolink_storage::ImageUploader;

use agrolink_auth::jwt::{AdminTokenIssuer, UserTokenIssuer};
use agrolink_auth::lockout::LockoutPolicy;
use agrolink_auth::password::{PasswordHasher, PasswordValidator};
use agrolink_core::result::AppResult;
use agrolink_database::repositories::admin_session::AdminSessionRepository;
use agrolink_database::repositories::audit::AuditLogRepository;
use agrolink_database::repositories::client_profile::ClientProfileRepository;
use agrolink_database::repositories::document::DocumentRepository;
use agrolink_database::repositories::member_profile::MemberProfileRepository;
use agrolink_database::repositories::notification::NotificationRepository;
use agrolink_database::repositories::password_reset::PasswordResetRepository;
use agrolink_database::repositories::product::ProductRepository;
use agrolink_database::repositories::rating::RatingRepository;
use agrolink_database::repositories::service_offering::ServiceOfferingRepository;
use agrolink_database::repositories::tool::ToolRepository;
use agrolink_database::repositories::transaction::TransactionRepository;
use agrolink_database::repositories::user_session::UserSessionRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Image uploader.
    pub uploader: Arc<ImageUploader>,

    // ── Auth ─────────────────────────────────────────────────
    /// User token verifier.
    pub user_verifier: Arc<UserTokenVerifier>,
    /// Admin token verifier.
    pub admin_verifier: Arc<AdminTokenVerifier>,
    /// Admin session manager (revocation checks).
    pub admin_sessions: Arc<AdminSessionManager>,

    // ── Repositories used by extractors ──────────────────────
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Admin repository.
    pub admin_repo: Arc<AdminRepository>,

    // ── Services ─────────────────────────────────────────────
    /// User auth flows.
    pub auth_service: Arc<AuthService>,
    /// Admin auth flows.
    pub admin_auth_service: Arc<AdminAuthService>,
    /// Admin account management.
    pub admin_account_service: Arc<AdminAccountService>,
    /// Verification state machine.
    pub verification_service: Arc<VerificationService>,
    /// Admin-mediated password resets.
    pub password_reset_service: Arc<PasswordResetService>,
    /// Ratings and moderation.
    pub rating_service: Arc<RatingService>,
    /// Listings.
    pub listing_service: Arc<ListingService>,
    /// Transactions.
    pub transaction_service: Arc<TransactionService>,
    /// Notifications.
    pub notification_service: Arc<NotificationService>,
    /// Profiles and directory.
    pub user_service: Arc<UserService>,
    /// Dashboard statistics and audit search.
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Wire all repositories and services over a connected pool.
    ///
    /// Used by the server binary and by integration tests.
    pub async fn build(config: Arc<AppConfig>, db_pool: PgPool) -> AppResult<Self> {
        // Repositories
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let admin_repo = Arc::new(AdminRepository::new(db_pool.clone()));
        let member_repo = Arc::new(MemberProfileRepository::new(db_pool.clone()));
        let client_repo = Arc::new(ClientProfileRepository::new(db_pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
        let audit_repo = Arc::new(AuditLogRepository::new(db_pool.clone()));
        let user_session_repo = Arc::new(UserSessionRepository::new(db_pool.clone()));
        let admin_session_repo = Arc::new(AdminSessionRepository::new(db_pool.clone()));
        let reset_repo = Arc::new(PasswordResetRepository::new(db_pool.clone()));
        let rating_repo = Arc::new(RatingRepository::new(db_pool.clone()));
        let product_repo = Arc::new(ProductRepository::new(db_pool.clone()));
        let service_repo = Arc::new(ServiceOfferingRepository::new(db_pool.clone()));
        let tool_repo = Arc::new(ToolRepository::new(db_pool.clone()));
        let transaction_repo = Arc::new(TransactionRepository::new(db_pool.clone()));

        // Auth building blocks
        let hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let user_issuer = Arc::new(UserTokenIssuer::new(&config.auth));
        let user_verifier = Arc::new(UserTokenVerifier::new(&config.auth));
        let admin_issuer = Arc::new(AdminTokenIssuer::new(&config.auth));
        let admin_verifier = Arc::new(AdminTokenVerifier::new(&config.auth));
        let admin_sessions = Arc::new(AdminSessionManager::new(Arc::clone(&admin_session_repo)));

        // Storage
        let store = agrolink_storage::providers::from_config(&config.storage).await?;
        let uploader = Arc::new(ImageUploader::new(
            store,
            config.storage.max_upload_size_bytes,
        ));

        // Services
        let auth_service = Arc::new(AuthService::new(
            db_pool.clone(),
            Arc::clone(&user_repo),
            Arc::clone(&member_repo),
            Arc::clone(&client_repo),
            Arc::clone(&user_session_repo),
            Arc::clone(&reset_repo),
            Arc::clone(&user_issuer),
            Arc::clone(&user_verifier),
            Arc::clone(&hasher),
            Arc::clone(&password_validator),
            LockoutPolicy::for_users(&config.auth),
        ));
        let admin_auth_service = Arc::new(AdminAuthService::new(
            Arc::clone(&admin_repo),
            Arc::clone(&admin_session_repo),
            Arc::clone(&admin_sessions),
            Arc::clone(&audit_repo),
            Arc::clone(&admin_issuer),
            Arc::clone(&hasher),
            Arc::clone(&password_validator),
            LockoutPolicy::for_admins(&config.auth),
        ));
        let admin_account_service = Arc::new(AdminAccountService::new(
            Arc::clone(&admin_repo),
            Arc::clone(&audit_repo),
            Arc::clone(&admin_sessions),
            Arc::clone(&hasher),
            Arc::clone(&password_validator),
        ));
        let verification_service = Arc::new(VerificationService::new(
            db_pool.clone(),
            Arc::clone(&user_repo),
            Arc::clone(&document_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&audit_repo),
            Arc::clone(&user_session_repo),
        ));
        let password_reset_service = Arc::new(PasswordResetService::new(
            db_pool.clone(),
            Arc::clone(&reset_repo),
            Arc::clone(&user_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&audit_repo),
            Arc::clone(&hasher),
        ));
        let rating_service = Arc::new(RatingService::new(
            db_pool.clone(),
            Arc::clone(&rating_repo),
            Arc::clone(&member_repo),
            Arc::clone(&client_repo),
            Arc::clone(&product_repo),
            Arc::clone(&service_repo),
            Arc::clone(&notification_repo),
            Arc::clone(&audit_repo),
        ));
        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&product_repo),
            Arc::clone(&service_repo),
            Arc::clone(&tool_repo),
            Arc::clone(&member_repo),
        ));
        let transaction_service = Arc::new(TransactionService::new(
            Arc::clone(&transaction_repo),
            Arc::clone(&member_repo),
            Arc::clone(&client_repo),
            Arc::clone(&notification_repo),
        ));
        let notification_service = Arc::new(NotificationService::new(Arc::clone(
            &notification_repo,
        )));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&member_repo),
            Arc::clone(&client_repo),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            Arc::clone(&user_repo),
            Arc::clone(&reset_repo),
            Arc::clone(&product_repo),
            Arc::clone(&service_repo),
            Arc::clone(&tool_repo),
            Arc::clone(&rating_repo),
            Arc::clone(&transaction_repo),
            Arc::clone(&audit_repo),
        ));

        Ok(Self {
            config,
            db_pool,
            uploader,
            user_verifier,
            admin_verifier,
            admin_sessions,
            user_repo,
            admin_repo,
            auth_service,
            admin_auth_service,
            admin_account_service,
            verification_service,
            password_reset_service,
            rating_service,
            listing_service,
            transaction_service,
            notification_service,
            user_service,
            dashboard_service,
        })
    }
}
