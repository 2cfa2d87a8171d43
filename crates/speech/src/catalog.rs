use serde::Serialize;
use strum::VariantNames;

use crate::types::Voice;

/// An entry in the fixed model catalog
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Response body for `GET /v1/audio/models`
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub data: Vec<ModelInfo>,
}

/// Response body for `GET /v1/audio/voices`
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<&'static str>,
}

/// The fixed, single-entry model catalog
pub(crate) fn models() -> ModelsResponse {
    ModelsResponse {
        data: vec![ModelInfo {
            id: "gemini-2.5-flash-preview-tts",
            name: "Gemini 2.5 Flash TTS",
        }],
    }
}

/// The fixed voice catalog
pub(crate) fn voices() -> VoicesResponse {
    VoicesResponse {
        voices: Voice::VARIANTS.to_vec(),
    }
}
