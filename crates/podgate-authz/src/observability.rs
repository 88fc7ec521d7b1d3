//! Tracing setup for hosts embedding the authorizer.
//!
//! # Notes
//! Initialization is guarded by `OnceLock` to keep it idempotent in tests and
//! when several components of one host call it.
use crate::AuthzConfig;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static OBS_INIT: OnceLock<()> = OnceLock::new();

/// Install a fmt subscriber filtered by `RUST_LOG`, or the configured filter.
pub fn init_tracing(config: &AuthzConfig) {
    OBS_INIT.get_or_init(|| {
        let filter = env_filter(config);
        let fmt_layer = tracing_subscriber::fmt::layer();
        // Another global subscriber may already be installed by the host.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}

fn env_filter(config: &AuthzConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER))
}
