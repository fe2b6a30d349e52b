// Web server: Axum JSON API for the dictionary.
//
// Public routes serve search and statistics; everything else needs a
// session. Role checks happen in the dictionary services, so handlers
// only translate between HTTP and service calls.
//
// Auth: stateless HMAC-SHA256 session tokens. No session table in the DB.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::variants::{OpenAiVariantGenerator, VariantGenerator};

pub mod auth;
pub mod error;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub config: Arc<Config>,
    /// None when no API key is configured; variant generation then answers 503.
    pub generator: Option<Arc<dyn VariantGenerator>>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn Database>) -> Result<Self> {
        let generator: Option<Arc<dyn VariantGenerator>> = if config.openai_enabled() {
            Some(Arc::new(OpenAiVariantGenerator::new(
                config.openai_api_key.clone(),
                &config.openai_base_url,
                config.openai_model.clone(),
            )?))
        } else {
            warn!("OPENAI_API_KEY not set, variant generation disabled");
            None
        };

        Ok(Self {
            db,
            config: Arc::new(config),
            generator,
        })
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, db: Arc<dyn Database>, port: u16, bind: &str) -> Result<()> {
    config.require_session_secret()?;
    let state = AppState::new(config, db)?;

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Qamus API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    use handlers::{admin, extract, moderation, profile, stats, variants, words};

    // Authenticated API routes (require a valid session)
    let protected_api = Router::new()
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/profile", get(profile::get_profile))
        .route("/api/words", get(words::list_words).post(words::create_word))
        .route("/api/words/mine", get(words::my_words))
        .route(
            "/api/words/{id}",
            get(words::get_word)
                .put(words::update_word)
                .delete(words::delete_word),
        )
        .route("/api/words/{id}/approve", put(moderation::approve_word))
        .route("/api/words/{id}/reject", put(moderation::reject_word))
        .route(
            "/api/words/{id}/variants",
            get(variants::list_variants).post(variants::generate_variants),
        )
        .route("/api/extract-words", post(extract::extract_words))
        .route("/api/save-word", post(words::save_word))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}/role", put(admin::set_role))
        .route(
            "/api/admin/words/{id}/challenge",
            put(admin::set_challenge_word),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Public routes (no auth)
    let public_api = Router::new()
        .route("/health", get(health))
        .route("/api/public/stats", get(stats::public_stats))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/words/search", get(words::search_words));

    Router::new()
        .merge(protected_api)
        .merge(public_api)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check. Always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "Not found")
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
