//! Log output setup.
//!
//! Logging is built as a [`Dispatch`] and installed only around the job
//! with [`tracing::dispatcher::with_default`]; nothing is registered
//! globally.

use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Level used when none is configured or the configured one is unknown.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Parse a log level name, accepting the usual Rust names as well as
/// `WARNING`, `CRITICAL` and `FATAL`. Case-insensitive.
pub fn level_from_name(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(LevelFilter::TRACE),
        "DEBUG" => Some(LevelFilter::DEBUG),
        "INFO" => Some(LevelFilter::INFO),
        "WARN" | "WARNING" => Some(LevelFilter::WARN),
        "ERROR" | "CRITICAL" | "FATAL" => Some(LevelFilter::ERROR),
        "OFF" => Some(LevelFilter::OFF),
        _ => None,
    }
}

/// A dispatch writing plain-text logs to stderr.
pub fn dispatch(level: LevelFilter) -> Dispatch {
    dispatch_with_writer(level, std::io::stderr)
}

/// A dispatch writing plain-text logs to `writer`.
///
/// `level` is the default directive; `RUST_LOG` can refine it per target.
pub fn dispatch_with_writer<W>(level: LevelFilter, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .finish();

    Dispatch::new(subscriber)
}
