use std::sync::Arc;

use aria_config::AuthConfig;
use aria_core::ErrorEnvelope;
use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Pre-condition gate in front of the speech pipeline
///
/// Requests on public paths pass through; everything else must carry a
/// bearer token that exactly matches one of the configured keys.
pub struct AuthGate {
    accepted_keys: Vec<String>,
    public_paths: Vec<String>,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            accepted_keys: config.accepted_keys(),
            public_paths: config.public_paths.clone(),
        }
    }
}

/// Authenticate requests via API key
pub async fn auth_middleware(gate: Arc<AuthGate>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if gate.public_paths.iter().any(|public| path.starts_with(public)) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        tracing::warn!("request attempted without credentials");
        return unauthorized("API key is missing");
    };

    if !gate.accepted_keys.iter().any(|key| key == token) {
        tracing::warn!(key_prefix = %redact(token), "request attempted with invalid API key");
        return unauthorized("Invalid API key");
    }

    tracing::debug!("API key verification successful");
    next.run(request).await
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(http::header::WWW_AUTHENTICATE, "Bearer")],
        Json(ErrorEnvelope::from_parts(message, "invalid_request_error")),
    )
        .into_response()
}

/// Keep only a short prefix of a presented key for log lines
fn redact(key: &str) -> String {
    key.get(..8).map_or_else(|| "***".to_owned(), |prefix| format!("{prefix}..."))
}
