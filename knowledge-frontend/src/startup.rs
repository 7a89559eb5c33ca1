use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::future::IntoFuture;
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Settings;
use crate::handlers;
use crate::services::knowledge_client::KnowledgeClient;
use crate::services::metrics::metrics_middleware;
use crate::AppState;

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let knowledge_client = Arc::new(KnowledgeClient::new(settings.knowledge_service.clone()));
        let state = AppState::new(knowledge_client);
        let app = build_router(state);

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub fn build_router(state: AppState) -> Router {
    // Session setup; sessions hold UI state (page, wizard draft, flash)
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    // Works both from the workspace root and from the member directory.
    let static_dir = if std::env::current_dir()
        .map(|d| d.ends_with("knowledge-frontend"))
        .unwrap_or(false)
    {
        "static"
    } else {
        "knowledge-frontend/static"
    };

    Router::new()
        .route("/", get(handlers::app::index))
        .route("/health", get(handlers::app::health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/documents", get(handlers::documents::documents_page))
        .route("/documents/sync", post(handlers::documents::sync_document))
        .route("/documents/wizard/open", post(handlers::wizard::open_wizard))
        .route(
            "/documents/wizard/choose",
            post(handlers::wizard::choose_type),
        )
        .route(
            "/documents/wizard/close",
            post(handlers::wizard::close_wizard),
        )
        .route(
            "/documents/wizard/submit",
            post(handlers::wizard::submit_wizard),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
