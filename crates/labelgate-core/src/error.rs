//! Shared error type across labelgate crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, LabelgateError>;

/// Unified error type used by core and proxy.
#[derive(Debug, Error)]
pub enum LabelgateError {
    #[error("read {path} failed: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("label file must contain a JSON object")]
    NotAnObject,
    #[error("unsupported value type for key {key}: {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
    #[error("label name must not be empty")]
    EmptyLabelName,
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("bind {addr} failed: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("watch: {0}")]
    Watch(String),
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("upstream timed out")]
    UpstreamTimeout,
    #[error("internal: {0}")]
    Internal(String),
}

impl LabelgateError {
    /// Stable code for logs, metric labels and tests.
    pub fn code(&self) -> &'static str {
        match self {
            LabelgateError::Read { .. } => "READ_FAILED",
            LabelgateError::InvalidJson(_) => "INVALID_JSON",
            LabelgateError::NotAnObject => "NOT_AN_OBJECT",
            LabelgateError::UnsupportedValue { .. } => "UNSUPPORTED_VALUE",
            LabelgateError::EmptyLabelName => "EMPTY_LABEL_NAME",
            LabelgateError::BadConfig(_) => "BAD_CONFIG",
            LabelgateError::Bind { .. } => "BIND_FAILED",
            LabelgateError::Watch(_) => "WATCH_FAILED",
            LabelgateError::Upstream(_) => "UPSTREAM_UNREACHABLE",
            LabelgateError::UpstreamStatus(_) => "UPSTREAM_STATUS",
            LabelgateError::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            LabelgateError::Internal(_) => "INTERNAL",
        }
    }
}
