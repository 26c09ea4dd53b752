//! Error types and handling for cmdlens-core operations.
//!
//! The taxonomy here is deliberately small: the query engine degrades rather
//! than fails for the conditions callers care about (an unavailable plugin
//! registry yields an empty index, a miss yields an empty result), so only
//! genuinely unexpected conditions surface as errors.

use thiserror::Error;

/// The main error type for cmdlens-core operations.
///
/// All fallible public functions in cmdlens-core return `Result<T, Error>`.
/// Note that the query operations themselves are infallible by design: a
/// failing host collaborator is logged and degrades to an empty index instead
/// of propagating (the component must never take down the host's
/// conversational turn).
#[derive(Error, Debug)]
pub enum Error {
    /// The plugin-lifecycle collaborator could not be read.
    ///
    /// Carried for callers that want to report *why* the index came up empty;
    /// the engine itself only logs this and continues.
    #[error("plugin host error: {0}")]
    Host(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Host(err.to_string())
    }
}

/// Result type alias for cmdlens-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = Error::Host("registry unavailable".to_string());
        assert_eq!(err.to_string(), "plugin host error: registry unavailable");
    }

    #[test]
    fn test_anyhow_conversion_maps_to_host() {
        let source = anyhow::anyhow!("connection reset");
        let err: Error = source.into();
        assert!(matches!(err, Error::Host(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
