//! Bistro restaurant ordering site.
//!
//! Visitors browse the menu, sign up, place pickup or delivery orders and
//! review their order history. Everything is stored in a local `SQLite`
//! database.
//!
//! The crate is a library so the binary, the CLI and the integration tests
//! can share the same setup.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::get,
};
use sqlx::SqlitePool;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};

use config::BistroConfig;
use services::auth::{AuthError, AuthService};
use state::AppState;

/// Directory holding the stylesheet and other static assets.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Errors preparing the database at startup.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to open database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),

    #[error("failed to create bootstrap account: {0}")]
    Bootstrap(#[from] AuthError),
}

/// Open the database, apply migrations and create the bootstrap account
/// when one is configured.
///
/// # Errors
///
/// Returns `InitError` if any step fails.
pub async fn init_database(config: &BistroConfig) -> Result<SqlitePool, InitError> {
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;
    tracing::info!("Database ready");

    if let Some(account) = &config.bootstrap {
        AuthService::new(&pool, Some(&account.email))
            .ensure_bootstrap_account(account)
            .await?;
    }

    Ok(pool)
}

/// Build the full application router, including the session store.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table cannot be created.
pub async fn build_app(state: AppState) -> Result<Router, sqlx::Error> {
    let store = middleware::create_session_store(state.pool()).await?;
    let session_layer = middleware::create_session_layer(store, state.config());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
            user_id = tracing::field::Empty,
        )
    });

    Ok(Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction()))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
