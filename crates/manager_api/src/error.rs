//! Typed API error returned in place of raw transport failures.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Closed set of failure kinds callers match on instead of HTTP status codes.
pub enum ApiErrorKind {
    /// The request body was malformed or rejected; the user must correct the input.
    Validation,
    /// The backend failed while handling the request.
    Server,
    /// The caller lacks permission.
    Forbidden,
    /// The target resource does not exist.
    NotFound,
    /// Anything else, including no response at all and timeouts.
    Unknown,
}

impl ApiErrorKind {
    /// Human-readable label for the kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Validation => "Validation Error",
            Self::Server => "Internal Server Error",
            Self::Forbidden => "Forbidden Error",
            Self::NotFound => "Not Found",
            Self::Unknown => "Unknown Error",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.kind, .detail))]
/// One failed request, classified.
pub struct ApiError {
    kind: ApiErrorKind,
    detail: Option<Value>,
}

impl ApiError {
    /// Creates an error without detail.
    pub fn new(kind: ApiErrorKind) -> Self {
        Self { kind, detail: None }
    }

    /// Creates an error carrying `detail` (text or structured validation detail).
    pub fn with_detail(kind: ApiErrorKind, detail: Value) -> Self {
        Self {
            kind,
            detail: Some(detail),
        }
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the detail payload, if the backend supplied one.
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    /// Returns the detail when it is plain text.
    pub fn detail_text(&self) -> Option<&str> {
        self.detail.as_ref().and_then(Value::as_str)
    }
}

fn render(kind: &ApiErrorKind, detail: &Option<Value>) -> String {
    match detail {
        Some(detail) => format!("{kind}: {detail}"),
        None => kind.to_string(),
    }
}
