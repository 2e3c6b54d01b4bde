#![forbid(unsafe_code)]

//! Structured logging bootstrap.
//!
//! Every shroud crate logs through `tracing`. Applications that want JSON
//! output without wiring their own subscriber enable the `tracing-json`
//! feature and call [`init_json`] once at startup. The filter comes from
//! `RUST_LOG` when set, otherwise [`DEFAULT_FILTER`].

use std::fmt;

/// Filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "shroud=info,shroud_widgets=info";

/// Errors from logging bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// A global subscriber was already installed.
    AlreadyInstalled(String),
    /// The filter directive could not be parsed.
    InvalidFilter(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled(msg) => write!(f, "global subscriber already installed: {msg}"),
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Install a JSON `tracing` subscriber as the global default.
///
/// # Errors
///
/// - [`LoggingError::InvalidFilter`] if `RUST_LOG` holds a malformed directive.
/// - [`LoggingError::AlreadyInstalled`] if called after another subscriber was set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter = match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive)
            .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?,
        _ => EnvFilter::new(DEFAULT_FILTER),
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}
