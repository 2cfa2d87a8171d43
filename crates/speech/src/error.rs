use aria_core::{ErrorEnvelope, HttpError};
use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpeechError>;

/// Errors raised by the speech pipeline
///
/// Each variant maps to exactly one (HTTP status, error type) pair. The
/// `Display` text may carry internal detail for logging; only
/// `client_message` crosses the API boundary.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Request failed schema validation
    #[error("invalid request: {message}")]
    InvalidRequest {
        message: String,
        /// Offending field, reported to the caller
        param: Option<String>,
    },

    /// Upstream rejected our credential; a server misconfiguration, not
    /// the caller's fault
    #[error("upstream authentication failed")]
    UpstreamAuth,

    /// Upstream rejected the input text under its content safety policy
    #[error("input blocked by upstream content policy")]
    ContentBlocked,

    /// Upstream outage, transport failure, or deadline exceeded;
    /// safe for the caller to retry
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Any other upstream failure
    #[error("unexpected upstream error: {0}")]
    Upstream(String),

    /// Audio decoding or encoding failed
    #[error("audio processing failed: {0}")]
    Transcode(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError for SpeechError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } | Self::ContentBlocked => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamAuth | Self::Upstream(_) | Self::Transcode(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest { .. } | Self::ContentBlocked => "invalid_request_error",
            _ => "api_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest { message, .. } => message.clone(),
            Self::UpstreamAuth => "Upstream API authentication failed. Check server configuration.".to_owned(),
            Self::ContentBlocked => {
                "The input text was blocked by the upstream content safety policy.".to_owned()
            }
            Self::UpstreamUnavailable(_) => "The upstream API is currently unavailable.".to_owned(),
            Self::Upstream(detail) => format!("An unexpected upstream API error occurred: {detail}"),
            Self::Transcode(cause) => format!("Internal server error during audio processing: {cause}"),
            Self::Internal(_) => "An internal server error occurred.".to_owned(),
        }
    }

    fn param(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { param, .. } => param.as_deref(),
            _ => None,
        }
    }
}

impl IntoResponse for SpeechError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // Full detail stays in the logs; the envelope carries only the
        // client-safe message.
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "speech request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "speech request rejected");
        }

        (status, Json(ErrorEnvelope::new(&self))).into_response()
    }
}
