//! Trip-planner client error types.

use std::fmt;

/// Errors from the trip-planner HTTP client.
#[derive(Debug)]
pub enum OtpError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body was not a plan document
    Json {
        message: String,
        body: Option<String>,
    },

    /// Planner returned a non-success status code
    Api { status: u16, message: String },

    /// Client could not be built from its configuration
    InvalidConfig(String),
}

impl fmt::Display for OtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpError::Http(e) => write!(f, "HTTP error: {e}"),
            OtpError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            OtpError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            OtpError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for OtpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OtpError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OtpError {
    fn from(err: reqwest::Error) -> Self {
        OtpError::Http(err)
    }
}
