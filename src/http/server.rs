//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router answering every path with the page handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Run page handling off the async runtime
//! - Swap in a rebuilt site when the configuration changes
//! - Serve until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{LapurdConfig, ServerConfig};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer, PageQuery};
use crate::http::response::{error_response, page_response};
use crate::observability::metrics;
use crate::site::Site;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<ArcSwap<Site>>,
}

/// HTTP server for a site.
pub struct HttpServer {
    router: Router,
    site: Arc<ArcSwap<Site>>,
    config: LapurdConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `site`.
    pub fn new(site: Arc<Site>, config: LapurdConfig) -> Self {
        let site = Arc::new(ArcSwap::new(site));
        let state = AppState { site: site.clone() };
        let router = Self::build_router(&config.server, state);
        Self { router, site, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(page_handler))
            .route("/", any(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The site currently being served.
    pub fn site(&self) -> Arc<Site> {
        self.site.load_full()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Every configuration received on `config_updates` rebuilds the site;
    /// a failed rebuild keeps the current one. Returns once `shutdown`
    /// fires and in-flight requests have completed.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<LapurdConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload = tokio::spawn(reload_site(self.site.clone(), self.config.clone(), config_updates));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &LapurdConfig {
        &self.config
    }
}

async fn reload_site(
    site: Arc<ArcSwap<Site>>,
    mut current: LapurdConfig,
    mut updates: mpsc::UnboundedReceiver<LapurdConfig>,
) {
    while let Some(config) = updates.recv().await {
        if config.server != current.server {
            tracing::warn!("Server settings changed; they take effect after a restart");
        }

        let catalog = site.load().shared_catalog();
        match Site::build(&config.site, catalog) {
            Ok(rebuilt) => {
                site.store(Arc::new(rebuilt));
                tracing::info!(application = %config.site.application, "Site reloaded");
                current = config;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to rebuild site. Keeping current site.");
            }
        }
    }
}

/// Main page handler.
/// Resolves the `q` parameter through the current site and renders the page.
async fn page_handler(State(state): State<AppState>, Query(query): Query<PageQuery>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_string();

    tracing::debug!(request_id = %request_id, q = ?query.q, "Handling page request");

    // Component code is synchronous and may block.
    let site = state.site.load_full();
    let result = tokio::task::spawn_blocking(move || site.handle(query.q.as_deref())).await;

    let response = match result {
        Ok(Ok(page)) => page_response(page),
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, error = %e, "Request failed");
            error_response(&e)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Page task panicked");
            let status = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
            axum::response::IntoResponse::into_response((status, "Internal Server Error"))
        }
    };

    metrics::record_request(response.status().as_u16(), start);
    response
}
