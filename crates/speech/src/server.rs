use crate::prompt::build_prompt;
use crate::provider::SpeechBackend;
use crate::transcode::transcode;
use crate::types::{SpeechRequest, SpeechResponse};

/// Speech server that drives the request-to-audio pipeline
///
/// Holds the backend behind the narrow `SpeechBackend` seam; everything
/// else is per-request.
pub struct Server {
    backend: Box<dyn SpeechBackend>,
}

impl Server {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self { backend }
    }

    /// Run the pipeline: prompt construction, generation, transcoding
    pub async fn synthesize(&self, request: &SpeechRequest) -> crate::error::Result<SpeechResponse> {
        tracing::info!(
            model = %request.model,
            voice = %request.voice,
            response_format = %request.response_format,
            speed = request.speed,
            input_len = request.input.len(),
            has_instructions = request.instructions.is_some(),
            "speech request received"
        );

        let prompt = build_prompt(request.instructions.as_deref(), request.speed, &request.input);

        let raw = self.backend.generate(&prompt, request.voice).await?;

        let audio = transcode(&raw, request.response_format).await?;

        tracing::info!(
            backend = self.backend.name(),
            response_format = %request.response_format,
            output_bytes = audio.len(),
            "speech request completed"
        );

        Ok(SpeechResponse {
            audio,
            content_type: request.response_format.content_type(),
        })
    }
}
