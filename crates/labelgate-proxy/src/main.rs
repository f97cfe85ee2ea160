//! labelgate
//!
//! Fetches an upstream metrics exposition on every scrape, injects the labels
//! from a watched JSON file into each sample line, and serves the result on
//! `/metrics`.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use labelgate_core::error::{LabelgateError, Result};
use labelgate_core::labels;
use labelgate_proxy::{
    app_state::AppState,
    config::{Args, ProxyConfig},
    obs::metrics::ProxyMetrics,
    router,
    store::LabelStore,
    upstream::HttpUpstream,
    watcher::ConfigWatcher,
};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "labelgate exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = ProxyConfig::from_args(args)?;

    // No usable label set yet, so a bad file here is fatal.
    let initial = labels::load_from_file(&cfg.label_config)?;
    tracing::info!(path = %cfg.label_config.display(), labels = initial.len(), "labels loaded");

    let store = Arc::new(LabelStore::new(initial));
    let metrics = Arc::new(ProxyMetrics::default());

    let _watch = ConfigWatcher::new(cfg.label_config.clone(), Arc::clone(&store), Arc::clone(&metrics))
        .spawn()?;

    let upstream = Arc::new(HttpUpstream::new(cfg.upstream_url.clone(), cfg.upstream_timeout)?);
    let state = AppState::new(store, upstream, metrics);
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .map_err(|source| LabelgateError::Bind {
            addr: cfg.listen.to_string(),
            source,
        })?;

    tracing::info!(listen = %cfg.listen, upstream = %cfg.upstream_url, "labelgate starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| LabelgateError::Internal(format!("server failed: {e}")))?;

    tracing::info!("labelgate stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.metrics().set_draining();
    tracing::info!("shutdown signal received, draining");
}
