use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use domain::services::{MediaStore, MockMediaStore};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_moderator,
    require_user_auth, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin_ads, admin_features, admin_prompts, admin_users, advertisements, auth, campaigns,
    credits, email_admin, features, health, media, profiles, prompts, table_browser, tags,
};
use crate::services::{AutomationService, EmailService, OrphanScanner};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub email: EmailService,
    pub automation: AutomationService,
    pub media_store: Arc<dyn MediaStore>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let rate_limiter =
        RateLimiterState::new(config.security.rate_limit_per_minute).map(Arc::new);

    let email = EmailService::new(config.email.clone(), pool.clone());
    let automation = AutomationService::new(pool.clone(), email.clone(), &config.automation);

    // In-memory store until a real object storage backend is wired in.
    let media_store: Arc<dyn MediaStore> = Arc::new(MockMediaStore::new());

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
        email,
        automation,
        media_store,
    };

    // CORS: any origin in development, explicit list in production
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/verify", post(auth::verify_email))
        .route("/api/tags", get(tags::list_tags))
        // Served creatives report engagement without a session
        .route("/api/ads/:id/impression", post(advertisements::record_impression))
        .route("/api/ads/:id/click", post(advertisements::record_click));

    // Authenticated routes.
    // Middleware order: auth runs first (outermost), then rate limiting
    // which needs the caller identity.
    let protected_routes = Router::new()
        .route("/api/profiles/me", get(profiles::get_me))
        .route("/api/profiles/me", patch(profiles::update_me))
        .route("/api/profiles/me/password", put(profiles::change_password))
        .route(
            "/api/profiles/username-available",
            get(profiles::username_available),
        )
        .route("/api/campaigns", post(campaigns::create_campaign))
        .route("/api/campaigns", get(campaigns::list_campaigns))
        .route("/api/campaigns/:id", get(campaigns::get_campaign))
        .route("/api/campaigns/:id", patch(campaigns::update_campaign))
        .route("/api/campaigns/:id/status", post(campaigns::change_status))
        .route("/api/campaigns/:id/ads", post(advertisements::create_ad))
        .route("/api/campaigns/:id/ads", get(advertisements::list_ads))
        .route("/api/ads/:id", patch(advertisements::update_ad))
        .route("/api/ads/:id", delete(advertisements::archive_ad))
        .route("/api/credits", post(credits::create_request))
        .route("/api/credits", get(credits::list_own_requests))
        .route("/api/credits/:id/invoice", get(credits::download_invoice))
        .route("/api/prompts", get(prompts::list_prompts))
        .route("/api/prompts/:id/dismiss", post(prompts::dismiss_prompt))
        .route("/api/features", get(features::resolve_features))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Moderation routes (moderator or admin role)
    let moderator_routes = Router::new()
        .route("/api/admin/ads/pending", get(admin_ads::list_pending))
        .route("/api/admin/ads/:id/decision", post(admin_ads::decide))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_moderator,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Admin routes
    let admin_routes = Router::new()
        .route("/api/admin/users", get(admin_users::list_users))
        .route("/api/admin/users/unverified", get(admin_users::list_unverified))
        .route("/api/admin/users/bulk-delete", post(admin_users::bulk_delete))
        .route("/api/admin/users/:id", patch(admin_users::update_user))
        .route("/api/admin/credits/pending", get(credits::list_pending))
        .route("/api/admin/credits/:id/approve", post(credits::approve_request))
        .route("/api/admin/credits/:id/reject", post(credits::reject_request))
        .route("/api/admin/tags", post(tags::create_tag))
        .route("/api/admin/tags/reorder", post(tags::reorder_tags))
        .route("/api/admin/tags/:id", patch(tags::update_tag))
        .route("/api/admin/tags/:id", delete(tags::delete_tag))
        .route("/api/admin/prompts", post(admin_prompts::create_prompt))
        .route("/api/admin/prompts/cleanup", post(admin_prompts::cleanup_dismissed))
        .route("/api/admin/automation/rules", get(admin_prompts::list_rules))
        .route("/api/admin/automation/rules", put(admin_prompts::upsert_rule))
        .route("/api/admin/automation/rules/:id", delete(admin_prompts::delete_rule))
        .route("/api/admin/automation/trigger", post(admin_prompts::manual_trigger))
        .route("/api/admin/features", get(admin_features::list_flags))
        .route("/api/admin/features", put(admin_features::upsert_flag))
        .route("/api/admin/features/:id", delete(admin_features::delete_flag))
        .route("/api/admin/features/:id/access", get(admin_features::list_access))
        .route("/api/admin/features/:id/access", post(admin_features::grant_access))
        .route(
            "/api/admin/features/:id/access/:user_id",
            delete(admin_features::revoke_access),
        )
        .route("/api/admin/email/history", get(email_admin::history))
        .route("/api/admin/email/stats", get(email_admin::stats))
        .route("/api/admin/media/orphans", get(media::list_orphans))
        .route("/api/admin/media/:bucket/:key", delete(media::remove_orphan))
        .route("/api/admin/tables", get(table_browser::list_tables))
        .route("/api/admin/tables/:name", get(table_browser::browse_table))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(moderator_routes)
        .merge(admin_routes)
        // Global middleware (bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

/// Convenience used by the orphan scan routes.
impl AppState {
    pub fn orphan_scanner(&self) -> OrphanScanner {
        OrphanScanner::new(self.pool.clone(), self.media_store.clone())
    }
}
