//! Client error types.

use thiserror::Error;

use crate::session::SessionError;

/// Errors returned by every service operation.
///
/// The variants mirror how a call can fail: before it is sent
/// ([`NotAuthenticated`](Self::NotAuthenticated)), on the wire
/// ([`Http`](Self::Http)), or because the backend rejected it
/// ([`Unauthorized`](Self::Unauthorized), [`Api`](Self::Api)).
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session is cached; raised before any request is sent.
    #[error("User not authenticated")]
    NotAuthenticated,

    /// The backend answered 401. The cached session has already been
    /// cleared and the login redirect fired.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Server-supplied message, or a generic one.
        message: String,
    },

    /// The backend answered with any other non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-supplied message, or a generic status-coded one.
        message: String,
    },

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx body could not be decoded as the expected envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// The persistent session store could not be written.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether this error means the caller must log in (again).
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized { .. })
    }

    /// HTTP status carried by the error, if the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body shape returned by the backend on failure.
///
/// Handlers fill `message`, `error`, or both.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Pick the most useful message, falling back to a status-coded one.
    pub(crate) fn into_message(self, status: u16) -> String {
        self.message
            .filter(|m| !m.is_empty())
            .or_else(|| self.error.filter(|e| !e.is_empty()))
            .unwrap_or_else(|| generic_message(status))
    }
}

/// Message used when the backend gives no usable error text.
pub(crate) fn generic_message(status: u16) -> String {
    format!("request failed with status {status}")
}
