// crates/admin-console/src/api/error.rs
// Uniform failure shape for every gateway call

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a failed response carries no usable `message` field
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Status reported for failures that never produced an HTTP response
pub const TRANSPORT_ERROR_STATUS: u16 = 500;

/// Stable classification of a failed call, derived from its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Network failure or unreadable body; no server status was received
    Transport,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    /// 5xx returned by the server
    Server,
    Other,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            409 => ApiErrorKind::Conflict,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

/// Failed gateway call: `{ message, status }` plus its kind
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub kind: ApiErrorKind,
}

impl ApiError {
    /// Application failure from a non-2xx response
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            kind: ApiErrorKind::from_status(status),
        }
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// The message comes from a string `message` field when the body is a JSON
    /// object carrying one; anything else falls back to the generic message.
    pub fn from_response_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        Self::from_status(status, message)
    }

    /// Transport-level failure (network error, unparsable body)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: TRANSPORT_ERROR_STATUS,
            kind: ApiErrorKind::Transport,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_forbidden(&self) -> bool {
        self.kind == ApiErrorKind::Forbidden
    }

    pub fn is_transport(&self) -> bool {
        self.kind == ApiErrorKind::Transport
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::transport(err.to_string())
    }
}
