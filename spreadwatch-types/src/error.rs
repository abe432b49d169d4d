use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchErrorKind {
    /// Network or HTTP-level failure (connection error, timeout, non-2xx status).
    Transport,
    /// Well-formed response whose `success` flag was false.
    ApiRejected,
    /// Payload could not be parsed or validated.
    Malformed,
}

/// Failure of a single data-source fetch.
///
/// Every variant is recoverable: the scheduler records the message, keeps the
/// previously applied dataset, and waits for the next tick or manual trigger.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// Network or HTTP-level failure.
    #[error("{}", transport_message(.status, .detail))]
    Transport {
        /// HTTP status code when a response was received.
        status: Option<u16>,
        /// Human-readable detail from the transport layer.
        detail: String,
    },

    /// The source answered but flagged the request as unsuccessful.
    #[error("source rejected the request{}", rejection_suffix(.message))]
    ApiRejected {
        /// Optional explanation supplied by the source.
        message: Option<String>,
    },

    /// The payload could not be decoded into a dataset.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

fn transport_message(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("request failed with HTTP status {code}"),
        None => format!("request failed: {detail}"),
    }
}

fn rejection_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl FetchError {
    /// Helper: build a `Transport` error for a non-2xx HTTP status.
    pub fn status(code: u16, detail: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(code),
            detail: detail.into(),
        }
    }

    /// Helper: build a `Transport` error for a failure without an HTTP response.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            detail: detail.into(),
        }
    }

    /// Helper: build a `Transport` error for a fetch that exceeded its deadline.
    #[must_use]
    pub fn timed_out(after: std::time::Duration) -> Self {
        Self::transport(format!(
            "timed out after {}ms",
            u64::try_from(after.as_millis()).unwrap_or(u64::MAX)
        ))
    }

    /// Helper: build an `ApiRejected` error with an optional message.
    #[must_use]
    pub const fn rejected(message: Option<String>) -> Self {
        Self::ApiRejected { message }
    }

    /// Helper: build a `Malformed` error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }

    /// The coarse kind of this failure.
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport { .. } => FetchErrorKind::Transport,
            Self::ApiRejected { .. } => FetchErrorKind::ApiRejected,
            Self::Malformed(_) => FetchErrorKind::Malformed,
        }
    }

    /// HTTP status code, if the failure carried one.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// The single message shown to users regardless of the failure kind.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Failed to fetch market data: {self}")
    }
}

/// Unified error type for the spreadwatch workspace.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be built or loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A command was sent to a refresh session that has already shut down.
    #[error("refresh session has stopped")]
    Stopped,

    /// A one-shot fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    /// Helper: build an `InvalidConfig` error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
