//! Session error types.

use thiserror::Error;

use crate::source::SourceError;

/// Errors returned by session control operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session was disconnected; it cannot scan again.
    #[error("Session is disconnected")]
    Disconnected,

    /// The reading source refused the subscription.
    #[error("Reading source error: {0}")]
    Source(#[from] SourceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_error() {
        let err: SessionError = SourceError::Disconnected.into();
        assert!(matches!(err, SessionError::Source(SourceError::Disconnected)));
        assert!(err.to_string().contains("disconnected"));
    }
}
