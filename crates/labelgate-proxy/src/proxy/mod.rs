//! Scrape handler: fetch upstream, relabel line by line, stream back.
//!
//! One label snapshot is taken per scrape, after the upstream has answered,
//! and used for every line of that response. Lines are written as they are
//! read; the upstream body is never buffered whole. A scrape is counted as
//! `ok` only once its body has been fully streamed.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{stream, Stream};
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use labelgate_core::transform_line;

use crate::app_state::AppState;
use crate::obs::metrics::ProxyMetrics;
use crate::upstream::UpstreamBody;

pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn scrape(State(app): State<AppState>) -> Response {
    let metrics = app.metrics();
    let started = Instant::now();

    let body = match app.upstream().fetch().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(upstream = %app.upstream().url(), code = e.code(), error = %e, "upstream fetch failed");
            metrics.upstream_errors.inc(&[("code", e.code())]);
            metrics.scrapes.inc(&[("result", "upstream_error")]);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("error contacting upstream: {e}\n"),
            )
                .into_response();
        }
    };
    metrics
        .upstream_fetch_duration
        .observe(&[], started.elapsed());

    let labels = app.store().snapshot().await;
    let fragment = labels.fragment();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        Body::from_stream(relabel_stream(body, fragment, metrics)),
    )
        .into_response()
}

/// Relabel `body` one line at a time, emitting each newline-terminated line.
///
/// Lines are split on raw bytes. A trailing `\r` is dropped, and a line that
/// is not valid UTF-8 is passed through unchanged like a comment. A read error
/// ends the stream with that error, which aborts the response; lines already
/// sent stay sent.
pub fn relabel_stream(
    body: UpstreamBody,
    fragment: String,
    metrics: Arc<ProxyMetrics>,
) -> impl Stream<Item = io::Result<Bytes>> + Send + 'static {
    let segments = StreamReader::new(body).split(b'\n');

    stream::try_unfold(
        (segments, fragment, metrics),
        |(mut segments, fragment, metrics)| async move {
            match segments.next_segment().await {
                Ok(Some(segment)) => {
                    let out = relabel_segment(segment, &fragment);
                    Ok(Some((out, (segments, fragment, metrics))))
                }
                Ok(None) => {
                    metrics.scrapes.inc(&[("result", "ok")]);
                    Ok(None)
                }
                Err(e) => {
                    metrics.upstream_errors.inc(&[("code", "STREAM_READ")]);
                    metrics.scrapes.inc(&[("result", "stream_error")]);
                    tracing::error!(error = %e, "upstream read failed mid-stream");
                    Err(e)
                }
            }
        },
    )
}

fn relabel_segment(mut segment: Vec<u8>, fragment: &str) -> Bytes {
    if segment.last() == Some(&b'\r') {
        segment.pop();
    }
    let mut out = match String::from_utf8(segment) {
        Ok(line) => transform_line(&line, fragment).into_owned().into_bytes(),
        Err(e) => {
            tracing::debug!("non-utf8 exposition line passed through");
            e.into_bytes()
        }
    };
    out.push(b'\n');
    Bytes::from(out)
}
