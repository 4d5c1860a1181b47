//! tracing bootstrap for hosts that do not install their own subscriber

use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Install a fmt subscriber filtered at `level`
///
/// `RUST_LOG` takes precedence when set. Returns false if a global
/// subscriber was already installed; calling this twice is harmless.
#[uniffi::export]
pub fn init_logging(level: LogLevel) -> bool {
    let level = chat2desk_bridge::config::LogLevel::from(level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
