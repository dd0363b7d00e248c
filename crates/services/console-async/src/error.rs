use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when using the console API client
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-success response returned by the console
    #[error("API error ({}): {}", .0.status_code.unwrap_or_default(), .0.message)]
    Api(ApiErrorObject),

    /// Configuration error (e.g., malformed base URL)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Error body returned by the console.
///
/// The console answers with either `{"error": "..."}` or
/// `{"status": "error", "message": "...", "code": 404}`; both shapes land here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
    /// `status` field of the body, usually `"error"`
    #[serde(default)]
    pub status: Option<String>,
    /// `error` field used by the simpler endpoints
    #[serde(default)]
    pub error: Option<String>,
    /// Extra diagnostic detail
    #[serde(default)]
    pub details: Option<String>,
}

impl ConsoleError {
    /// Determines if this error is retryable
    ///
    /// Retryable errors include rate limits (429), timeouts (408),
    /// conflicts (409), server errors (5xx), and connect/timeout transport failures.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => obj
                .status_code
                .is_some_and(crate::retry::is_retryable_status),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::Config(_) | Self::Serde(_) => false,
        }
    }

    /// HTTP status carried by an [`ConsoleError::Api`] error
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => obj.status_code,
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) => None,
        }
    }
}

/// Maps a serde deserialization error to a `ConsoleError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> ConsoleError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    ConsoleError::Serde(format!("{e}: {snippet}"))
}

/// Deserializes an API error from the response body
///
/// Attempts to parse the error as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> ConsoleError {
    let status_code = Some(status.as_u16());

    if let Ok(mut obj) = serde_json::from_slice::<ApiErrorObject>(body) {
        obj.status_code = status_code;
        if obj.message.is_empty()
            && let Some(err) = &obj.error
        {
            obj.message.clone_from(err);
        }
        return ConsoleError::Api(obj);
    }

    // Flask may answer with an HTML error page; cap body to avoid log/memory bloat
    ConsoleError::Api(ApiErrorObject {
        status_code,
        message: String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
        status: None,
        error: Some(format!("http_{}", status.as_u16())),
        details: None,
    })
}
