//! HTTP surface of the forecast proxy.
//!
//! Kept as a library so the router can be exercised from integration tests;
//! the binary in `main.rs` only parses arguments and serves it.

pub mod routes;

pub use routes::{AppState, router};
