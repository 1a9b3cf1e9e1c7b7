//! Logging setup based on tracing / tracing-subscriber.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set; otherwise `bin_name` and
/// this crate are logged at `default_level`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let directive = format!(
        "{}={},idobata={}",
        bin_name.replace('-', "_"),
        default_level,
        default_level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
