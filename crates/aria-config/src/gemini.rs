use secrecy::SecretString;
use serde::Deserialize;

/// Upstream Gemini TTS configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key for the Gemini API
    pub api_key: SecretString,

    /// Generation model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override, without a trailing slash
    #[serde(default)]
    pub base_url: Option<String>,

    /// Deadline for a single generation call, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    60
}
