//! HTTP API gateway for learnpal.
//!
//! Exposes goals CRUD, read-only users and conversation history, the
//! `/ask_gpt/` assistant endpoint, an OpenAPI document with a docs page, and
//! a health check.
//!
//! Built on Axum.

pub mod ask;
pub mod conversations;
pub mod docs;
pub mod error;
pub mod extract;
pub mod goals;
pub mod users;

use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use learnpal_assistant::AssistantService;
use learnpal_config::{AppConfig, redact_url};
use learnpal_core::store::Store;

/// Shared application state for the gateway.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub assistant: AssistantService,
}

pub type SharedState = Arc<AppState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(docs::router())
        .merge(goals::router())
        .merge(conversations::router())
        .merge(users::router())
        .merge(ask::router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Connects the store, bootstraps the schema, builds the completion provider
/// and serves until Ctrl-C.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = config.database_url();
    let store =
        learnpal_storage::connect(&database_url, config.database.max_connections).await?;
    store.migrate().await?;
    info!(backend = store.name(), database = %redact_url(&database_url), "Store ready");

    let provider = learnpal_providers::build_from_config(&config)?;
    let assistant = AssistantService::from_config(&config, store.clone(), provider);
    info!(
        provider = assistant.provider_name(),
        engine = assistant.engine(),
        "Assistant ready"
    );

    let app = build_router(Arc::new(AppState { store, assistant }));

    let addr = config.bind_addr();
    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
}

// --- Handlers ---

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
