//! Logging setup for gridway services.
//!
//! Wraps `tracing-subscriber` so binaries pick a filter and an output format
//! in one call. Library crates only use the re-exported `tracing` macros.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use tracing::{debug, error, info, instrument, trace, warn, Level};
pub use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("invalid log filter:: {0}")]
    Filter(String),

    #[error("subscriber already installed:: {0}")]
    Init(String),
}

/// Build a filter from an explicit directive, falling back to `RUST_LOG`
/// and finally to `info`
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter, LogError> {
    match level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| LogError::Filter(e.to_string())),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Initialize the global tracing subscriber
pub fn init_tracing(level: Option<&str>, format: LogFormat) -> Result<(), LogError> {
    let filter = make_filter(level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Plain => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| LogError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_filter() {
        assert!(make_filter(Some("debug")).is_ok());
        assert!(make_filter(Some("gridway=trace,tower_http=info")).is_ok());
        assert!(make_filter(Some("gridway=notalevel")).is_err());
    }

    #[test]
    fn test_log_format_from_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }
        let w: Wrapper = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(w.format, LogFormat::Json);
    }
}
