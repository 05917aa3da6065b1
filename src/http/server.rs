//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeouts, limits, request ID)
//! - Serve on the bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::http::annotate;
use crate::http::request::{self, RequestIdGenerator, X_REQUEST_ID};
use crate::lifecycle::{LifecycleState, ServiceContext, Shutdown, ShutdownSignal};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ServiceContext>,
    pub shutdown: Shutdown,
    pub lifecycle: watch::Receiver<LifecycleState>,
}

/// HTTP server for the annotation service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server. Annotation resources are mounted under `base_path`.
    pub fn new(state: AppState, base_path: &str) -> Self {
        let router = Self::build_router(state, base_path);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, base_path: &str) -> Router {
        let config = state.context.config();
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let body_limit = config.listener.max_body_bytes;

        let resources = Router::new()
            .route(
                "/annotate",
                get(annotate::annotate_get).post(annotate::annotate_post),
            )
            .route("/spot", get(annotate::spot_get).post(annotate::spot_post));

        let mut router = Router::new().route("/health", get(health));
        router = if base_path.is_empty() {
            router.merge(resources)
        } else {
            router.nest(base_path, resources)
        };

        if config.admin.enabled {
            router = router.merge(admin::setup_admin_router(state.clone()));
        }

        router
            .with_state(state)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestIdGenerator))
                    .layer(TraceLayer::new_for_http().make_span_with(request::make_span::<Body>))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Serve with graceful shutdown
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    state: LifecycleState,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        state: *state.lifecycle.borrow(),
    })
}
