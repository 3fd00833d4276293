//! Typed errors for the booking API client.
//!
//! Every failed operation funnels through [`ApiError`]. Backend error bodies
//! are decoded once at the client boundary, so callers always see the
//! backend's message string rather than a raw response shape.

use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionError;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend rejected the request and said why.
    Backend,
    /// The request never completed (connect, DNS, body transfer).
    Network,
    /// Local persisted state failed.
    Local,
}

/// Errors surfaced by [`BookingClient`](crate::BookingClient) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend returned an error response.
    ///
    /// `message` is the decoded `message` field when the body was
    /// structured, the raw body text otherwise. Displays as exactly that
    /// message.
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The persisted session marker could not be read or written.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Shape of a structured backend error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Backend { .. } => ErrorKind::Backend,
            Self::Http(_) => ErrorKind::Network,
            Self::Session(_) => ErrorKind::Local,
        }
    }

    /// Build a backend error from a non-success response body.
    ///
    /// If the body carries a structured `{"message": ...}` object, only the
    /// message is kept; anything else is surfaced as-is.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body).map_or(body, |b| b.message);
        Self::Backend { status, message }
    }
}
