//! Axum router wiring.
//!
//! `/metrics` is the relabeled upstream; everything else is operational.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, proxy};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(proxy::scrape))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/-/metrics", get(ops::metrics))
        .with_state(state)
}
