//! Logger setup for the library and the CLI.
//!
//! The filter comes from `TIC_LOG_LEVEL`, then `RUST_LOG`, and defaults to
//! `info`.

use log::{error, info, log_enabled, Level};

/// Environment variable read before `RUST_LOG`.
pub const TIC_LOG_ENV: &str = "TIC_LOG_LEVEL";

const DEFAULT_FILTER: &str = "info";

/// Initializes the logger with the `env_logger` crate.
///
/// Calling it more than once is harmless; only the first call installs the
/// logger.
pub fn init_logger() {
    let env = env_logger::Env::default().filter_or(TIC_LOG_ENV, default_filter());
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn default_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}
