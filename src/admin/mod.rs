//! Administrative endpoints.
//!
//! Mounted only when `admin.enabled`; every route requires the admin key.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/policies", get(get_policies))
        .route("/admin/shutdown", post(post_shutdown))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
