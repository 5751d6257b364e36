//! Process-wide `tracing` subscriber driven by [`LoggingConfig`].
//!
//! The level filter sits behind a reload layer, so a `logging_level` config
//! update through [`crate::StorefrontClient::update_config`] takes effect
//! without reinstalling the subscriber.

use std::sync::OnceLock;

use storefront_config::LoggingConfig;
use tracing::debug;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER_HANDLE: OnceLock<FilterHandle> = OnceLock::new();

/// Install the global subscriber at the configured level.
///
/// `RUST_LOG` wins over `config.level` when it parses. Returns `false` when
/// logging was already initialized, in which case nothing changes.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let (filter_layer, handle) = reload::Layer::new(filter);
    if FILTER_HANDLE.set(handle).is_err() {
        debug!("logging already initialized");
        return false;
    }

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Swap the active level filter.
///
/// Returns `false` if logging was not initialized by [`init_logging`] or the
/// level does not parse as a filter directive.
pub fn set_log_level(level: &str) -> bool {
    let Some(handle) = FILTER_HANDLE.get() else {
        return false;
    };
    match EnvFilter::try_new(level) {
        Ok(filter) => handle.reload(filter).is_ok(),
        Err(err) => {
            debug!(level, error = %err, "ignoring unparsable log level");
            false
        }
    }
}
