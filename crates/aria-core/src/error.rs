use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Request field that caused the error, if any
    fn param(&self) -> Option<&str> {
        None
    }

    /// Machine-readable error code, if any
    fn code(&self) -> Option<&str> {
        None
    }
}

/// OpenAI-style error envelope: `{"error": {...}}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Body of the error envelope
///
/// `param` and `code` are omitted from the serialized form when absent,
/// never emitted as null.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorEnvelope {
    /// Build the envelope for a domain error
    pub fn new<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetail {
                message: error.client_message(),
                error_type: error.error_type().to_owned(),
                param: error.param().map(str::to_owned),
                code: error.code().map(str::to_owned),
            },
        }
    }

    /// Build an envelope from bare parts, for errors raised outside a
    /// domain error type (e.g. the auth gate)
    pub fn from_parts(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                error_type: error_type.into(),
                param: None,
                code: None,
            },
        }
    }
}
