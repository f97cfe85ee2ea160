//! Scripted upstreams and state builders shared by proxy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use futures_util::{stream, StreamExt};
use tokio::sync::mpsc;
use tower::ServiceExt;

use labelgate_core::error::{LabelgateError, Result};
use labelgate_core::LabelSet;
use labelgate_proxy::app_state::AppState;
use labelgate_proxy::obs::metrics::ProxyMetrics;
use labelgate_proxy::router::build_router;
use labelgate_proxy::store::LabelStore;
use labelgate_proxy::upstream::{Upstream, UpstreamBody};

/// Serves the same chunks on every fetch.
pub struct StaticUpstream {
    pub chunks: Vec<&'static str>,
}

#[async_trait]
impl Upstream for StaticUpstream {
    fn url(&self) -> &str {
        "static://test"
    }

    async fn fetch(&self) -> Result<UpstreamBody> {
        let chunks: Vec<io::Result<Bytes>> = self
            .chunks
            .iter()
            .copied()
            .map(|c| Ok(Bytes::from_static(c.as_bytes())))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}

/// Fails before any body is produced.
pub struct FailingUpstream {
    pub status: Option<u16>,
}

#[async_trait]
impl Upstream for FailingUpstream {
    fn url(&self) -> &str {
        "failing://test"
    }

    async fn fetch(&self) -> Result<UpstreamBody> {
        match self.status {
            Some(code) => Err(LabelgateError::UpstreamStatus(code)),
            None => Err(LabelgateError::Upstream("connection refused".into())),
        }
    }
}

/// Body chunks are pushed by the test through the returned sender.
/// Single use: the second fetch fails.
pub struct ChannelUpstream {
    rx: Mutex<Option<mpsc::Receiver<io::Result<Bytes>>>>,
}

impl ChannelUpstream {
    pub fn new() -> (Self, mpsc::Sender<io::Result<Bytes>>) {
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                rx: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl Upstream for ChannelUpstream {
    fn url(&self) -> &str {
        "channel://test"
    }

    async fn fetch(&self) -> Result<UpstreamBody> {
        let rx = self
            .rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| LabelgateError::Upstream("already fetched".into()))?;
        Ok(stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) }).boxed())
    }
}

pub fn labels(pairs: &[(&str, &str)]) -> LabelSet {
    LabelSet::from_pairs(pairs.iter().copied()).unwrap()
}

pub struct Harness {
    pub app: Router,
    pub store: Arc<LabelStore>,
    pub metrics: Arc<ProxyMetrics>,
    pub state: AppState,
}

pub fn harness(store: Arc<LabelStore>, upstream: Arc<dyn Upstream>) -> Harness {
    let metrics = Arc::new(ProxyMetrics::default());
    let state = AppState::new(Arc::clone(&store), upstream, Arc::clone(&metrics));
    Harness {
        app: build_router(state.clone()),
        store,
        metrics,
        state,
    }
}

pub async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = get(app, uri).await;
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
