//! JSON log output.
//!
//! Filter directives are read from, in order:
//!
//! 1. `PHONEFIELD_LOG`
//! 2. `RUST_LOG`
//! 3. the default, `warn`
//!
//! Events are written to stderr as one JSON object per line.

use std::env;

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Crate-specific filter variable. Takes precedence over `RUST_LOG`.
pub const PHONEFIELD_LOG: &str = "PHONEFIELD_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Logging could not be initialised.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directives did not parse.
    #[error("invalid log filter {directives:?}: {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },
    /// A global subscriber is already installed.
    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Pick the filter directives from the given variable values.
#[must_use]
pub fn select_directives(phonefield_log: Option<String>, rust_log: Option<String>) -> String {
    phonefield_log
        .or(rust_log)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

/// Build the filter from the environment.
///
/// # Errors
///
/// Returns [`LoggingError::Filter`] when the selected directives are invalid.
pub fn env_filter() -> Result<EnvFilter, LoggingError> {
    let directives = select_directives(env::var(PHONEFIELD_LOG).ok(), env::var("RUST_LOG").ok());
    EnvFilter::try_new(&directives).map_err(|source| LoggingError::Filter { directives, source })
}

/// Install a global JSON subscriber.
///
/// # Errors
///
/// Fails on an invalid filter, or when a global subscriber is already set.
pub fn init() -> Result<(), LoggingError> {
    let filter = env_filter()?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phonefield_log_wins() {
        assert_eq!(
            select_directives(Some("phonefield_widgets=debug".into()), Some("info".into())),
            "phonefield_widgets=debug"
        );
    }

    #[test]
    fn falls_back_to_rust_log_then_default() {
        assert_eq!(select_directives(None, Some("info".into())), "info");
        assert_eq!(select_directives(None, None), DEFAULT_FILTER);
        assert_eq!(select_directives(Some("  ".into()), None), DEFAULT_FILTER);
    }

    #[test]
    fn bad_directives_are_reported() {
        let err = EnvFilter::try_new("phonefield=notalevel").unwrap_err();
        let err = LoggingError::Filter {
            directives: "phonefield=notalevel".into(),
            source: err,
        };
        assert!(err.to_string().contains("notalevel"));
    }
}
