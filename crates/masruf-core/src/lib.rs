//! masruf-core
//!
//! Business logic for the expense ledger: the mutation engine, the
//! aggregation services, the storage seam, and the stable public API.
//! Depends on masruf-domain. No CLI, no terminal I/O.

pub mod error;
pub mod ledger_engine;
pub mod public_api;
pub mod stats_service;
pub mod storage;
pub mod time;

pub use error::{CoreError, Result};
pub use ledger_engine::*;
pub use public_api::*;
pub use stats_service::*;
pub use storage::*;
pub use time::*;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
        tracing::info!("masruf core tracing initialized");
    });
}

#[cfg(test)]
mod tests;
