//! Record model and internal diagnostics
//!
//! Centralizes the record-side types:
//! - `LogRecord` / `LogLevel` - what formatters read
//! - `LogFilter` - handler-side level and name filtering

pub mod filter;
pub mod record;

pub use filter::LogFilter;
pub use record::{LogLevel, LogRecord};

/// Initialize internal tracing for diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
/// Diagnostics go to stderr so they never interleave with formatted records.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
