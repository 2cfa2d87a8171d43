#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod catalog;
mod error;
mod prompt;
mod provider;
mod request;
mod server;
mod transcode;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

pub use catalog::{ModelInfo, ModelsResponse, VoicesResponse};
pub use error::{Result, SpeechError};
pub use prompt::build_prompt;
pub use provider::SpeechBackend;
pub use server::Server;
pub use types::{AudioFormat, RawAudio, SpeechRequest, SpeechResponse, Voice};

use provider::gemini::GeminiBackend;
use request::ExtractPayload;
use types::SpeechPayload;

/// Build the speech server from configuration
pub fn build_server(config: &aria_config::Config) -> anyhow::Result<Arc<Server>> {
    let backend = GeminiBackend::new(&config.gemini)
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech backend: {e}"))?;

    Ok(Arc::new(Server::new(Box::new(backend))))
}

/// Create the endpoint router for the audio API
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/speech", post(synthesize))
        .route("/v1/audio/models", get(list_models))
        .route("/v1/audio/voices", get(list_voices))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(payload): ExtractPayload<SpeechPayload>,
) -> Result<axum::response::Response> {
    let request = payload.validate()?;

    tracing::debug!("speech handler called for model: {}", request.model);

    let response = server.synthesize(&request).await?;

    tracing::debug!("speech synthesis complete");

    Ok(response.into_response())
}

/// Handle the audio model catalog listing
async fn list_models() -> Json<ModelsResponse> {
    tracing::debug!("models list requested");
    Json(catalog::models())
}

/// Handle the voice catalog listing
async fn list_voices() -> Json<VoicesResponse> {
    tracing::debug!("voices list requested");
    Json(catalog::voices())
}
