use serde::Deserialize;
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};

use crate::error::{Result, SpeechError};

/// Speed multiplier domain, inclusive on both ends
pub const MIN_SPEED: f64 = 0.25;
pub const MAX_SPEED: f64 = 4.0;
const DEFAULT_SPEED: f64 = 1.0;

/// Prebuilt Gemini voice catalog
///
/// The set is closed: a request naming anything else is rejected during
/// validation, before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
pub enum Voice {
    Zephyr,
    Puck,
    Charon,
    Kore,
    Fenrir,
    Leda,
    Orus,
    Aoede,
    Callirrhoe,
    Autonoe,
    Enceladus,
    Iapetus,
    Umbriel,
    Algieba,
    Despina,
    Erinome,
    Algenib,
    Rasalgethi,
    Laomedeia,
    Achernar,
    Alnilam,
    Schedar,
    Gacrux,
    Pulcherrima,
    Achird,
    Zubenelgenubi,
    Vindemiatrix,
    Sadachbia,
    Sadaltager,
    Sulafat,
}

/// Target audio container/codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
}

impl AudioFormat {
    /// Media type sent with a successful response in this format
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
        }
    }
}

/// Untrusted speech request body, as deserialized from JSON
///
/// Fields are captured as raw JSON values so that validation can report the
/// first offending field in declaration order, with a `param` naming it.
/// Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SpeechPayload {
    #[serde(default)]
    model: Option<Value>,
    #[serde(default)]
    input: Option<Value>,
    #[serde(default)]
    voice: Option<Value>,
    #[serde(default)]
    instructions: Option<Value>,
    #[serde(default)]
    speed: Option<Value>,
    #[serde(default)]
    response_format: Option<Value>,
}

impl SpeechPayload {
    /// Validate the payload into a typed request
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(self) -> Result<SpeechRequest> {
        let model = required_string("model", self.model)?;

        let input = required_string("input", self.input)?;
        if input.is_empty() {
            return Err(invalid_field("input", "input must not be empty"));
        }

        let voice = required_string("voice", self.voice)?;
        let voice = voice
            .parse::<Voice>()
            .map_err(|_| invalid_field("voice", format!("'{voice}' is not a supported voice")))?;

        let instructions = optional_string("instructions", self.instructions)?;

        let speed = optional_number("speed", self.speed)?.unwrap_or(DEFAULT_SPEED);
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(invalid_field(
                "speed",
                format!("speed must be between {MIN_SPEED} and {MAX_SPEED}"),
            ));
        }

        let response_format = match optional_string("response_format", self.response_format)? {
            Some(format) => format.parse::<AudioFormat>().map_err(|_| {
                invalid_field(
                    "response_format",
                    format!("'{format}' is not a supported response format"),
                )
            })?,
            None => AudioFormat::default(),
        };

        Ok(SpeechRequest {
            model,
            input,
            voice,
            instructions,
            speed,
            response_format,
        })
    }
}

/// Validated speech synthesis request
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// Model identifier from the caller, echoed into logs only
    pub model: String,
    /// Text to synthesize
    pub input: String,
    /// Voice preset
    pub voice: Voice,
    /// Free-text delivery instructions
    pub instructions: Option<String>,
    /// Speed multiplier in [0.25, 4.0]
    pub speed: f64,
    /// Target container/codec
    pub response_format: AudioFormat,
}

/// Headerless PCM payload produced by the upstream backend
///
/// Contract: signed 16-bit little-endian samples, 24 kHz, mono.
#[derive(Debug)]
pub struct RawAudio(Vec<u8>);

impl RawAudio {
    pub const fn new(pcm: Vec<u8>) -> Self {
        Self(pcm)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Transcoded audio ready to be returned to the caller
pub struct SpeechResponse {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// Media type of the audio (e.g. "audio/mpeg")
    pub content_type: &'static str,
}

impl SpeechResponse {
    /// Convert the speech response into an axum HTTP response
    pub fn into_response(self) -> axum::response::Response {
        axum::response::Response::builder()
            .header(http::header::CONTENT_TYPE, self.content_type)
            .body(axum::body::Body::from(self.audio))
            .unwrap_or_else(|_| {
                axum::response::Response::builder()
                    .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(axum::body::Body::empty())
                    .unwrap()
            })
    }
}

fn invalid_field(param: &str, message: impl Into<String>) -> SpeechError {
    SpeechError::InvalidRequest {
        message: message.into(),
        param: Some(param.to_owned()),
    }
}

fn required_string(field: &str, value: Option<Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(invalid_field(field, format!("{field} must be a string"))),
        None => Err(invalid_field(field, format!("{field} is required"))),
    }
}

fn optional_string(field: &str, value: Option<Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(invalid_field(field, format!("{field} must be a string"))),
    }
}

fn optional_number(field: &str, value: Option<Value>) -> Result<Option<f64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid_field(field, format!("{field} must be a number"))),
        Some(_) => Err(invalid_field(field, format!("{field} must be a number"))),
    }
}
