//! Gate Router

use axum::Router;
use axum::routing::{get, post};

use crate::Gate;
use crate::presentation::handlers;

/// The gate's own routes: POST on the validate path, GET on the void path.
///
/// Merge this into the host application's router.
pub fn gate_router(gate: &Gate) -> Router {
    Router::new()
        .route(&gate.config.validate_path, post(handlers::validate))
        .route(&gate.config.void_path, get(handlers::void))
        .with_state(gate.clone())
}
