pub mod gemini;

use async_trait::async_trait;

use crate::types::{RawAudio, Voice};

/// Narrow seam over the generative TTS backend
///
/// The rest of the pipeline sees exactly one operation: synthesize raw
/// audio for a prompt and voice, with failures already classified into
/// `SpeechError`.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Generate raw PCM audio for the prompt, spoken with the given voice
    async fn generate(&self, prompt: &str, voice: Voice) -> crate::error::Result<RawAudio>;

    /// Get the backend name
    fn name(&self) -> &str;
}
