use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use aria_config::GeminiConfig;

use crate::error::SpeechError;
use crate::types::{RawAudio, Voice};

use super::SpeechBackend;

const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini generative TTS backend
///
/// Issues single-shot `generateContent` calls with an audio response
/// modality. Holds no per-request state beyond the reusable HTTP client.
pub(crate) struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl GeminiBackend {
    pub fn new(config: &GeminiConfig) -> anyhow::Result<Self> {
        let mut headers = http::HeaderMap::new();
        headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Some(Duration::from_secs(5)))
            .tcp_nodelay(true)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .default_headers(headers)
            .build()?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

// -- Wire types for the generateContent call --

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

#[async_trait]
impl SpeechBackend for GeminiBackend {
    async fn generate(&self, prompt: &str, voice: Voice) -> crate::error::Result<RawAudio> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(
            "Gemini generation request: model={}, voice={voice}, prompt_len={}",
            self.model,
            prompt.len(),
        );

        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.to_string(),
                        },
                    },
                },
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed to send: {e}");
                classify_transport(&e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Gemini API error ({status}): {detail}");

            return Err(classify_status(status.as_u16(), detail));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to read Gemini response body: {e}");
            SpeechError::Upstream(format!("failed to read upstream response: {e}"))
        })?;

        let pcm = extract_audio(payload)?;

        tracing::debug!("Gemini synthesis complete, {} bytes of PCM", pcm.len());

        Ok(RawAudio::new(pcm))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Map an upstream HTTP status onto the error taxonomy
///
/// 401/403 mean our own credential was rejected, which is a server
/// misconfiguration from the caller's point of view. 400 is Gemini
/// rejecting the text, typically under its content safety policy. Gateway
/// and server errors are transient. Everything else funnels into the
/// catch-all, which keeps the upstream detail.
fn classify_status(status: u16, detail: String) -> SpeechError {
    match status {
        401 | 403 => SpeechError::UpstreamAuth,
        400 => SpeechError::ContentBlocked,
        500 | 502 | 503 | 504 => SpeechError::UpstreamUnavailable(format!("upstream returned {status}")),
        _ => SpeechError::Upstream(detail),
    }
}

/// Map a transport-level failure onto the error taxonomy
///
/// A deadline exceeded or an unreachable upstream counts as unavailable;
/// anything else is unexpected.
fn classify_transport(error: &reqwest::Error) -> SpeechError {
    if error.is_timeout() || error.is_connect() {
        SpeechError::UpstreamUnavailable(error.to_string())
    } else {
        SpeechError::Upstream(error.to_string())
    }
}

/// Pull the first audio payload out of the first candidate
fn extract_audio(response: GenerateContentResponse) -> crate::error::Result<Vec<u8>> {
    let data = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.inline_data))
        .map(|inline| inline.data)
        .ok_or_else(|| SpeechError::Upstream("upstream response contained no audio data".to_owned()))?;

    BASE64
        .decode(data)
        .map_err(|e| SpeechError::Upstream(format!("upstream audio payload was not valid base64: {e}")))
}
