//! Upstream exposition source.
//!
//! The scrape handler only sees the `Upstream` trait: one call per scrape
//! that either fails before anything is written, or hands back the body as a
//! byte stream. `HttpUpstream` is the production implementation.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};

use labelgate_core::error::{LabelgateError, Result};

/// Raw upstream body, chunked as it arrives.
pub type UpstreamBody = BoxStream<'static, io::Result<Bytes>>;

#[async_trait]
pub trait Upstream: Send + Sync {
    /// Where scrapes are fetched from, for logs.
    fn url(&self) -> &str;

    /// Start one fetch. Errors here mean nothing has been streamed yet.
    async fn fetch(&self) -> Result<UpstreamBody>;
}

/// Plain-HTTP GET against the configured exporter.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    url: String,
}

impl HttpUpstream {
    /// `timeout` bounds the whole exchange, body included.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LabelgateError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn map_reqwest(e: reqwest::Error) -> LabelgateError {
    if e.is_timeout() {
        LabelgateError::UpstreamTimeout
    } else {
        LabelgateError::Upstream(e.to_string())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<UpstreamBody> {
        let resp = self.client.get(&self.url).send().await.map_err(map_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LabelgateError::UpstreamStatus(status.as_u16()));
        }

        Ok(resp
            .bytes_stream()
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    io::ErrorKind::TimedOut
                } else {
                    io::ErrorKind::Other
                };
                io::Error::new(kind, e)
            })
            .boxed())
    }
}
