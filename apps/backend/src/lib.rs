pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use quizwall_core::{ExportStore, Exporter, ImportTarget, SessionKeyGenerator, TemplateRegistry};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::sessions::SessionStore;
use crate::services::storage::MemoryExportStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TemplateRegistry>,
    pub exports: Arc<dyn ExportStore>,
    pub sessions: Arc<SessionStore>,
    pub keys: Arc<SessionKeyGenerator>,
    pub target: Arc<ImportTarget>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, Arc::new(MemoryExportStore::new(config.export_ttl)))
    }

    /// State backed by a caller-supplied export store.
    pub fn with_store(config: &Config, exports: Arc<dyn ExportStore>) -> Self {
        Self {
            registry: Arc::new(TemplateRegistry::default()),
            exports,
            sessions: Arc::new(SessionStore::new(config.card_ttl)),
            keys: Arc::new(SessionKeyGenerator::new(config.session_key_prefix.clone())),
            target: Arc::new(ImportTarget::new(config.import_base_url.clone())),
        }
    }

    pub fn exporter(&self) -> Exporter<'_> {
        Exporter::new(&self.registry, self.exports.as_ref(), &self.keys, &self.target)
    }
}

/// All routes, without transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/message", post(routes::message::handle))
        .route("/api/templates", get(routes::templates::list))
        .route("/api/exports/:session_key", get(routes::exports::get))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let exports = Arc::new(MemoryExportStore::new(config.export_ttl));
    let state = AppState::with_store(&config, exports.clone());
    tracing::info!(
        templates = state.registry.all_metadata().len(),
        card_ttl_secs = config.card_ttl.num_seconds(),
        export_ttl_secs = config.export_ttl.num_seconds(),
        "state initialized"
    );

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            ticker.tick().await;
            let now = chrono::Utc::now();
            let dropped = sessions.purge_stale(now);
            if dropped > 0 {
                tracing::debug!(dropped, "purged stale sessions");
            }
            match exports.purge_stale(now) {
                Ok(0) => {}
                Ok(dropped) => tracing::debug!(dropped, "purged expired exports"),
                Err(e) => tracing::warn!(error = %e, "export purge failed"),
            }
        }
    });

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
