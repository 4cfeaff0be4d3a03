//! Logging initialisation primitives.
//!
//! # Design
//! - Centralises subscriber setup (fmt or JSON) behind a single entry point.
//! - Output goes to any `MakeWriter`; the browser shell supplies a console writer.
//! - Timestamps and ANSI colours are off because the console adds its own.

use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{filter}'")]
    Filter {
        /// Directive that failed to parse.
        filter: String,
        /// Underlying parse failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Emit logs as structured JSON objects.
    Json,
    /// Emit human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Filter directive (e.g., `info`, `hero_ui=debug`).
    pub level: &'a str,
    /// Output format selection.
    pub format: LogFormat,
}

impl<'a> LoggingConfig<'a> {
    /// Configuration for `level` with the build-appropriate format.
    #[must_use]
    pub const fn new(level: &'a str) -> Self {
        Self {
            level,
            format: LogFormat::infer(),
        }
    }
}

/// Parse a filter directive.
///
/// # Errors
/// Returns [`TelemetryError::Filter`] when the directive is malformed.
pub fn parse_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|source| TelemetryError::Filter {
        filter: level.to_string(),
        source,
    })
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
/// Returns an error if the filter is invalid or a subscriber is already installed.
pub fn init_logging<W>(config: &LoggingConfig<'_>, writer: W) -> Result<(), TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = parse_filter(config.level)?;
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init()?,
    }
    Ok(())
}
