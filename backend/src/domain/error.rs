//! Domain-level error type.
//!
//! Errors are transport agnostic: services return them, and the HTTP adapter
//! maps the [`ErrorCode`] to a status code and serialises the payload as the
//! response body. The human-readable message travels under the `detail` key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// The document store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Error payload shared by every driving port.
///
/// ## Invariants
/// - `detail` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use pantry::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Item not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "Item not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    #[serde(rename = "detail")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation failures raised by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, capturing the in-scope trace identifier.
    ///
    /// Blank messages are replaced by the code's generic description so the
    /// payload always carries a readable `detail`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: generic_message(code).to_owned(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Fallible constructor that rejects blank messages.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach an explicit trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details, e.g. the offending field.
    ///
    /// # Examples
    /// ```
    /// use pantry::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad date").with_details(json!({ "field": "expiry_date" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn generic_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "Invalid request",
        ErrorCode::NotFound => "Record not found",
        ErrorCode::ServiceUnavailable => "Service unavailable",
        ErrorCode::InternalError => "Internal server error",
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
