//! Command-line configuration.
//!
//! `Args` is the raw clap surface; `ProxyConfig` is the validated form the
//! rest of the proxy consumes.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use labelgate_core::error::{LabelgateError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "labelgate",
    version,
    about = "Re-serves an upstream metrics exposition with extra labels injected"
)]
pub struct Args {
    /// Path to the JSON label file (required, watched for changes).
    #[arg(long = "label-config")]
    pub label_config: PathBuf,

    /// Port to serve on.
    #[arg(long, default_value_t = 9001)]
    pub port: u16,

    /// Upstream exposition address, `host:port/path`.
    #[arg(long = "export-url", default_value = "127.0.0.1:9100/metrics")]
    pub export_url: String,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Upstream request timeout in seconds.
    #[arg(long = "upstream-timeout-secs", default_value_t = 10)]
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub label_config: PathBuf,
    pub listen: SocketAddr,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.label_config.as_os_str().is_empty() {
            return Err(LabelgateError::BadConfig(
                "--label-config must not be empty".into(),
            ));
        }
        if args.port == 0 {
            return Err(LabelgateError::BadConfig("--port must not be 0".into()));
        }
        if !(1..=300).contains(&args.upstream_timeout_secs) {
            return Err(LabelgateError::BadConfig(
                "--upstream-timeout-secs must be between 1 and 300".into(),
            ));
        }

        Ok(Self {
            label_config: args.label_config,
            listen: SocketAddr::new(args.bind, args.port),
            upstream_url: upstream_url(&args.export_url)?,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
        })
    }
}

/// Turn `host:port/path` into a plain-HTTP URL.
///
/// An explicit `http://` prefix is accepted; any other scheme is rejected
/// since the upstream is only ever contacted without TLS.
pub fn upstream_url(export_url: &str) -> Result<String> {
    let s = export_url.trim();
    if s.is_empty() {
        return Err(LabelgateError::BadConfig("--export-url must not be empty".into()));
    }
    if s.starts_with("http://") {
        return Ok(s.to_string());
    }
    if let Some((scheme, _)) = s.split_once("://") {
        return Err(LabelgateError::BadConfig(format!(
            "--export-url scheme {scheme} is not supported, use host:port/path"
        )));
    }
    Ok(format!("http://{s}"))
}
