//! Observability: tracing initialization.
//!
//! Logs always go to stderr; stdout is reserved for command output and,
//! in the engine process, the boundary reply stream.

use crate::config::env_keys;
use crate::config::loader::{env_bool, env_optional};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call once at process startup.
/// When COMPONENTGEN_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let level = if env_bool(env_keys::QUIET, false) {
        "componentgen=warn".to_string()
    } else {
        env_optional(env_keys::LOG_LEVEL).unwrap_or_else(|| "info".to_string())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if env_bool(env_keys::LOG_JSON, false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}
