//! Structured logging setup for the command-line tool
//!
//! Log lines go to stderr alongside the progress bar. `RUST_LOG` takes
//! precedence over the verbosity flag when set.

use crate::io::configuration::DEFAULT_LOG_LEVEL;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Map the number of `-v` flags to a filter directive
pub const fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_LOG_LEVEL,
        1 => "debug",
        _ => "trace",
    }
}

/// Build the log filter from `RUST_LOG`, falling back to the verbosity level
pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbosity: u8) {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(stderr_layer)
        .try_init();
}
