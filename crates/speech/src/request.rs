use aria_core::ErrorEnvelope;
use axum::Json;
use axum::body::Body;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;

/// Extractor for JSON request bodies
///
/// Rejections are rendered as the standard error envelope so callers see
/// one error shape everywhere.
pub struct ExtractPayload<T>(pub T);

/// Body limit for speech requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

static APPLICATION_JSON: http::HeaderValue = http::HeaderValue::from_static("application/json");

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let is_json = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .is_some_and(|value| {
                value == APPLICATION_JSON
                    || value
                        .to_str()
                        .is_ok_and(|value| value.trim_start().starts_with("application/json"))
            });

        if !is_json {
            return Err(reject(
                http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err)
                .is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
            {
                reject(
                    http::StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                reject(
                    http::StatusCode::BAD_REQUEST,
                    format!("Failed to read request body: {err}"),
                )
            }
        })?;

        let payload = serde_json::from_slice::<T>(&bytes)
            .map_err(|e| reject(http::StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")))?;

        Ok(Self(payload))
    }
}

fn reject(status: http::StatusCode, message: impl Into<String>) -> axum::response::Response {
    let envelope = ErrorEnvelope::from_parts(message, "invalid_request_error");
    (status, Json(envelope)).into_response()
}
