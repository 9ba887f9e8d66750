//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all student handlers
//! - Wire up middleware (tracing, request ID, metrics, optional timeout)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown, bounded by the grace period

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, oneshot};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::{handlers, response};
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::observability::metrics;
use crate::storage::StudentStorage;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StudentStorage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StudentStorage>) -> Self {
        Self { storage }
    }
}

/// Build the student API router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    let router = Router::new()
        .route("/api/students/health", get(handlers::health))
        .route(
            "/api/students",
            get(handlers::list_students)
                .post(handlers::create_student)
                .put(handlers::update_student),
        )
        .route(
            "/api/students/{id}",
            get(handlers::get_student).delete(handlers::delete_student),
        )
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_metrics));

    let router = match config.timeouts.request_secs {
        Some(secs) => router
            .layer(TimeoutLayer::new(Duration::from_secs(secs)))
            .layer(middleware::from_fn(response::envelope_timeouts)),
        None => router,
    };

    router
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id(request),
            )
        }))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

/// HTTP server for the student API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over the given storage backend.
    pub fn new(config: ServiceConfig, storage: Arc<dyn StudentStorage>) -> Self {
        let router = build_router(&config, AppState::new(storage));
        Self { router, config }
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// After the signal no new connections are accepted; in-flight requests
    /// get `shutdown.grace_period_secs` to finish before the server task is
    /// aborted.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.shutdown.grace_period_secs);
        tracing::info!(address = %addr, "HTTP server starting");

        let (draining_tx, draining_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, self.router).with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            let _ = draining_tx.send(());
        });
        let mut serve_task = tokio::spawn(async move { serve.await });

        let joined = tokio::select! {
            joined = &mut serve_task => joined,
            _ = draining_rx => {
                tracing::info!(grace_period_secs = grace.as_secs(), "Shutting down, draining connections");
                match tokio::time::timeout(grace, &mut serve_task).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!("Grace period elapsed, closing remaining connections");
                        serve_task.abort();
                        return Ok(());
                    }
                }
            }
        };

        joined.map_err(std::io::Error::other)??;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
