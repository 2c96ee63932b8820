//! Kling AI virtual try-on client library.
//!
//! Provides per-request token signing, typed wire messages, an HTTP API
//! wrapper behind the [`api::TryOnApi`] trait, bounded task polling, and
//! the caller-facing [`service::process_try_on`] operation.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod messages;
pub mod poller;
pub mod service;

pub use client::{KlingClient, TryOnError};
pub use config::KlingConfig;
pub use service::{process_try_on, TryOnOutcome};
