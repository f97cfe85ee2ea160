//! Label file hot reload.
//!
//! The watcher observes the label file's parent directory (non-recursive)
//! and filters by file name, so editors that save by rename or by
//! delete-and-recreate still trigger a reload. A failed reload is logged and
//! the previous label set stays live; the loop only ends with the process.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use labelgate_core::error::{LabelgateError, Result};
use labelgate_core::labels;

use crate::obs::metrics::ProxyMetrics;
use crate::store::LabelStore;

pub struct ConfigWatcher {
    path: PathBuf,
    store: Arc<LabelStore>,
    metrics: Arc<ProxyMetrics>,
}

impl ConfigWatcher {
    pub fn new(path: impl Into<PathBuf>, store: Arc<LabelStore>, metrics: Arc<ProxyMetrics>) -> Self {
        Self {
            path: path.into(),
            store,
            metrics,
        }
    }

    /// Install the OS watch and spawn the reload loop.
    ///
    /// Fails only if the watch itself cannot be set up; must be called from
    /// within a tokio runtime.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let (dir, file_name) = watch_target(&self.path)?;

        let (tx, rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                // Receiver only goes away at shutdown.
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| LabelgateError::Watch(format!("create watcher failed: {e}")))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| LabelgateError::Watch(format!("watch {} failed: {e}", dir.display())))?;

        tracing::info!(path = %self.path.display(), dir = %dir.display(), "label file watch started");
        Ok(tokio::spawn(self.run(watcher, rx, file_name)))
    }

    async fn run(
        self,
        // Dropping the watcher stops event delivery, so the loop owns it.
        _watcher: RecommendedWatcher,
        mut rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
        file_name: OsString,
    ) {
        while let Some(res) = rx.recv().await {
            match res {
                Ok(event) => {
                    if is_reload_event(&event, &file_name) {
                        tracing::info!(kind = ?event.kind, "label file changed, reloading");
                        // Outcome is logged inside reload.
                        let _ = self.reload().await;
                    }
                }
                Err(e) => {
                    self.metrics.reloads.inc(&[("result", "watch_error")]);
                    tracing::warn!(error = %e, "label file watcher error");
                }
            }
        }
        tracing::warn!("label file watcher channel closed");
    }

    /// Load the file and swap it in. On failure the current set is kept.
    pub async fn reload(&self) -> Result<usize> {
        // Read and parse happen before the store lock is taken.
        match labels::load_from_file(&self.path) {
            Ok(next) => {
                let n = next.len();
                self.store.replace(next).await;
                self.metrics.reloads.inc(&[("result", "ok")]);
                tracing::info!(labels = n, "labels reloaded");
                Ok(n)
            }
            Err(e) => {
                self.metrics.reloads.inc(&[("result", "error")]);
                tracing::error!(path = %self.path.display(), code = e.code(), error = %e, "label reload failed, keeping previous labels");
                Err(e)
            }
        }
    }
}

/// Split the label file path into the directory to watch and the file name
/// to filter on.
fn watch_target(path: &Path) -> Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LabelgateError::Watch(format!("{} has no file name", path.display())))?
        .to_os_string();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}

fn is_reload_event(event: &Event, file_name: &OsStr) -> bool {
    let kind_matches = match event.kind {
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) | EventKind::Create(_) => true,
        _ => false,
    };
    kind_matches
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}
