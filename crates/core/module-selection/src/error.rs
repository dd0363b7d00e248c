use std::time::Duration;

use console_async::ConsoleError;
use thiserror::Error;

/// Why a catalog load produced no catalog.
///
/// Recovered at the boundary: the reconciler drops back to its empty state and
/// the caller decides what to tell the operator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadFailure {
    /// Connection refused, reset, DNS failure, ...
    #[error("catalog request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("catalog request returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not a module list
    #[error("catalog response was malformed: {0}")]
    Malformed(String),

    /// No answer within the load timeout
    #[error("catalog request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ConsoleError> for LoadFailure {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Api(obj) => Self::Status {
                status: obj.status_code.unwrap_or_default(),
                message: obj.message,
            },
            ConsoleError::Reqwest(e) => Self::Transport(e.to_string()),
            ConsoleError::Serde(msg) => Self::Malformed(msg),
            ConsoleError::Config(msg) => Self::Transport(msg),
        }
    }
}
