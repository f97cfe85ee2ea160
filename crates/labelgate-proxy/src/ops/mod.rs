//! Operational HTTP endpoints.
//!
//! - `/healthz`   : liveness
//! - `/readyz`    : readiness (503 when draining)
//! - `/-/metrics` : the proxy's own metrics, Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::proxy::EXPOSITION_CONTENT_TYPE;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let labels = state.store().snapshot().await;
    let body = state
        .metrics()
        .render(&[("labelgate_labels", labels.len() as u64)]);

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
