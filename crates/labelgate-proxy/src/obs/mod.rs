//! Lightweight in-process metrics for the proxy itself.
//!
//! Counters are stored as atomics and rendered by the `/-/metrics` handler,
//! separate from the relabeled upstream payload on `/metrics`.

pub mod metrics;
