//! Client errors.

use std::fmt;

/// Result type for gateway calls.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by a [`crate::GatewayClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    /// The gateway answered with a non-success status.
    Status { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout, reset).
    Transport { message: String, timeout: bool },

    /// The response body did not match the expected shape.
    Decode { message: String },

    /// The configured base URL or header could not be used.
    InvalidConfig { message: String },
}

impl ClientError {
    /// Response body carried by a status error, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.is_empty() => Some(body.as_str()),
            _ => None,
        }
    }

    /// HTTP status carried by a status error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "gateway returned status {status}")
                } else {
                    write!(f, "gateway returned status {status} - Body: {body}")
                }
            }
            Self::Transport { message, timeout } => {
                if *timeout {
                    write!(f, "request timed out: {message}")
                } else {
                    write!(f, "transport error: {message}")
                }
            }
            Self::Decode { message } => write!(f, "unexpected response body: {message}"),
            Self::InvalidConfig { message } => write!(f, "invalid client config: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            Self::InvalidConfig {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
                timeout: err.is_timeout(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}
