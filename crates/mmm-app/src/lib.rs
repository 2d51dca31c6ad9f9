//! mmm-app
//!
//! Application facade for MMM: wires the ledger store, persistence, clock,
//! and scan adapter into one service that presentation layers drive.

pub mod app;

use std::sync::Once;

pub use app::App;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("mmm_app=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("MMM tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_does_not_panic() {
        super::init_tracing();
        super::init_tracing();
    }
}
