//! labelgate core: label sets, fragment rendering, and the per-line
//! exposition transform.
//!
//! This crate carries no runtime or transport dependencies. The proxy crate
//! owns the store, watcher and HTTP plumbing; everything here is pure and
//! synchronous so it can be exercised directly from tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! A malformed label file or an odd exposition line must surface as
//! `LabelgateError` or pass through untouched, never crash the proxy.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod labels;
pub mod transform;

/// Shared result type.
pub use error::{LabelgateError, Result};
pub use labels::LabelSet;
pub use transform::transform_line;
