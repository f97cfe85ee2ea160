//! labelgate proxy library entry.
//!
//! Wires the label store, file watcher, upstream client and axum router into
//! the relabeling proxy. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod proxy;
pub mod router;
pub mod store;
pub mod upstream;
pub mod watcher;
