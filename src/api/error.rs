//! Normalized API error shape

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Message recorded when a request future fails in an unexpected way
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred while fetching data.";

/// Where an [`ApiError`] came from, judged by the fields it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server answered non-2xx with a parseable error body
    Structured,
    /// Transport failure or unparseable body; only a message is known
    Unstructured,
}

/// Error surfaced to the view, whatever the failure origin
///
/// Field names follow the server's camelCase error body so a structured
/// body deserializes directly into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient_string")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Error carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Transport failure: `"<context>: <underlying message>"`
    pub fn transport(context: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("{}: {}", context, err))
    }

    /// Error recorded when a request panicked instead of settling
    pub fn unexpected() -> Self {
        Self::new(UNEXPECTED_ERROR)
    }

    /// Normalize a non-2xx response
    ///
    /// A JSON object body is taken as the server's structured error, with
    /// `context` standing in for a missing message. Anything else yields the
    /// generic `"HTTP error! Status: <code>"`.
    pub fn from_response(status: u16, body: &str, context: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value::<ApiError>(v).ok());

        match parsed {
            Some(mut error) => {
                if error.message.trim().is_empty() {
                    error.message = context.to_string();
                }
                error
            }
            None => Self::new(format!("HTTP error! Status: {}", status)),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        if self.error_code.is_some()
            || self.status.is_some()
            || self.path.is_some()
            || self.timestamp.is_some()
            || self.details.is_some()
        {
            ApiErrorKind::Structured
        } else {
            ApiErrorKind::Unstructured
        }
    }
}

// The server sends `status` as a number and `timestamp` in whatever shape its
// serializer picked; keep the text of any scalar and the JSON of the rest.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}
