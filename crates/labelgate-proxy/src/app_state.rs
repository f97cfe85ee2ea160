//! Shared application state for the proxy.
//!
//! Everything the handlers touch is owned here and handed in at
//! construction, so tests can assemble a state around a scripted upstream.

use std::sync::Arc;

use crate::obs::metrics::ProxyMetrics;
use crate::store::LabelStore;
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<LabelStore>,
    upstream: Arc<dyn Upstream>,
    metrics: Arc<ProxyMetrics>,
}

impl AppState {
    pub fn new(
        store: Arc<LabelStore>,
        upstream: Arc<dyn Upstream>,
        metrics: Arc<ProxyMetrics>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                upstream,
                metrics,
            }),
        }
    }

    pub fn store(&self) -> Arc<LabelStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn upstream(&self) -> Arc<dyn Upstream> {
        Arc::clone(&self.inner.upstream)
    }

    pub fn metrics(&self) -> Arc<ProxyMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
