// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types and the user-facing messages derived from them.

/// Page-level message shown when the activity list cannot be loaded.
pub const LIST_LOAD_FAILED: &str = "Failed to fetch activities";

/// Page-level message shown when the bulk refresh request fails.
pub const REFRESH_FAILED: &str = "Failed to refresh last 10 activities";

/// Error type for every backend call made by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// A 2xx response whose body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Activity {0} is not in the current collection")]
    UnknownActivity(u64),

    #[error("Name generation already pending for activity {0}")]
    AlreadyPending(u64),

    /// An action gated by a busy flag was invoked while still outstanding.
    #[error("{0} already in progress")]
    Busy(&'static str),
}

impl ClientError {
    /// Message to show the user for this error.
    ///
    /// Backend failures surface their response body verbatim when it is
    /// non-empty; everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Backend { body, .. } if !body.trim().is_empty() => {
                body.trim().to_string()
            }
            _ => fallback.to_string(),
        }
    }

    /// HTTP status for backend failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
