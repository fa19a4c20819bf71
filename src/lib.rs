//! Campaign-E2E: resilient interaction layer for campaign app verification
//!
//! This library provides fallback-chain element resolution, bounded readiness
//! polling, and page objects for driving the campaign web app end to end.

pub mod error;
pub mod config;

pub mod data;
pub mod fixtures;
pub mod locator;
pub mod memo;
pub mod pages;
pub mod poll;
pub mod session;

// Re-exports
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a test process; RUST_LOG takes precedence over the
/// configured level. Safe to call from every test, only the first call wins.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Campaign-E2E library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
