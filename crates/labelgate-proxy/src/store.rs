//! Live label set shared by the scrape handler and the config watcher.
//!
//! Readers clone an `Arc` under a read lock and then work on that snapshot
//! for as long as they need. A reload builds the next set first and only
//! takes the write lock for the pointer swap.

use std::sync::Arc;

use tokio::sync::RwLock;

use labelgate_core::LabelSet;

#[derive(Debug, Default)]
pub struct LabelStore {
    current: RwLock<Arc<LabelSet>>,
}

impl LabelStore {
    pub fn new(initial: LabelSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Point-in-time view. Never observes a half-applied reload.
    pub async fn snapshot(&self) -> Arc<LabelSet> {
        Arc::clone(&*self.current.read().await)
    }

    /// Atomically install `next` for every later `snapshot` call.
    pub async fn replace(&self, next: LabelSet) {
        let next = Arc::new(next);
        *self.current.write().await = next;
    }
}
