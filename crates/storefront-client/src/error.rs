//! Normalized API errors.
//!
//! Whatever goes wrong, callers get a `{message, statusCode}` value:
//!
//! - `400` keeps every error object the API returned, since each one points
//!   at a specific field or parameter.
//! - Other status codes the API is known to return carry the first error's
//!   detail, except `500`, whose detail is replaced by a generic message.
//! - Anything else (unknown status, connection failures, timeouts) carries
//!   the message of the underlying failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Status codes the API reports with an `errors` body.
pub const API_ERROR_CODES: [u16; 9] = [400, 401, 403, 404, 409, 410, 412, 424, 500];

const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// A single error object from an API `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopwareError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ShopwareError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Validation(Vec<ShopwareError>),
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Validation(errors) => {
                let details: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
                    .collect();
                if details.is_empty() {
                    f.write_str("Validation failed")
                } else {
                    f.write_str(&details.join("; "))
                }
            }
        }
    }
}

/// How an error was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// `400` with field-level errors.
    Validation,
    /// Another status from [`API_ERROR_CODES`].
    Api,
    /// Unknown status or no response at all.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ClientApiError {
    pub message: ErrorMessage,
    /// HTTP status, absent when no response was received.
    pub status_code: Option<u16>,
}

impl ClientApiError {
    /// Normalize a non-2xx response.
    ///
    /// `raw_message` is used when the status is not one the API reports
    /// errors with, or when a known status comes without any detail.
    pub fn from_response(status: u16, body: &str, raw_message: impl Into<String>) -> Self {
        if !API_ERROR_CODES.contains(&status) {
            return Self::transport(raw_message, Some(status));
        }

        let errors = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.errors)
            .unwrap_or_default();

        let message = match status {
            400 => ErrorMessage::Validation(errors),
            500 => ErrorMessage::Text(INTERNAL_SERVER_ERROR.to_string()),
            _ => ErrorMessage::Text(
                errors
                    .into_iter()
                    .next()
                    .and_then(|e| e.detail)
                    .unwrap_or_else(|| raw_message.into()),
            ),
        };

        Self {
            message,
            status_code: Some(status),
        }
    }

    /// Failure without a usable API response.
    pub fn transport(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: ErrorMessage::Text(message.into()),
            status_code,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status_code {
            Some(400) => ApiErrorKind::Validation,
            Some(status) if API_ERROR_CODES.contains(&status) => ApiErrorKind::Api,
            _ => ApiErrorKind::Transport,
        }
    }

    /// Field-level errors of a validation failure.
    pub fn validation_errors(&self) -> &[ShopwareError] {
        match &self.message {
            ErrorMessage::Validation(errors) => errors,
            ErrorMessage::Text(_) => &[],
        }
    }
}

impl From<reqwest::Error> for ClientApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string(), err.status().map(|s| s.as_u16()))
    }
}
