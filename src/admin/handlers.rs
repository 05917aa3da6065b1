use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::http::server::AppState;
use crate::lifecycle::LifecycleState;
use crate::policy::{DisambiguationPolicy, SpotterPolicy};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub state: LifecycleState,
    pub public_base_uri: String,
    pub namespace_prefix: String,
    pub spotters: usize,
    pub disambiguators: usize,
}

#[derive(Serialize)]
pub struct LoadedPolicies {
    pub spotters: Vec<SpotterPolicy>,
    pub disambiguators: Vec<DisambiguationPolicy>,
}

#[derive(Serialize)]
pub struct ShutdownAck {
    pub status: &'static str,
    /// False when shutdown had already been requested.
    pub triggered: bool,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let context = &state.context;
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        state: *state.lifecycle.borrow(),
        public_base_uri: context.config().service.public_base_uri.clone(),
        namespace_prefix: context.namespace_prefix().to_string(),
        spotters: context.spotter_count(),
        disambiguators: context.disambiguator_count(),
    })
}

pub async fn get_policies(State(state): State<AppState>) -> Json<LoadedPolicies> {
    Json(LoadedPolicies {
        spotters: state.context.loaded_spotters(),
        disambiguators: state.context.loaded_disambiguators(),
    })
}

pub async fn post_shutdown(State(state): State<AppState>) -> (StatusCode, Json<ShutdownAck>) {
    let triggered = state.shutdown.trigger();
    tracing::info!(triggered, "Shutdown requested through admin endpoint");
    (
        StatusCode::ACCEPTED,
        Json(ShutdownAck {
            status: "stopping",
            triggered,
        }),
    )
}
