#![allow(clippy::must_use_candidate)]

pub mod auth;
mod env;
pub mod gemini;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use auth::AuthConfig;
pub use gemini::GeminiConfig;
pub use health::HealthConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryConfig;

/// Top-level Aria configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// API key authentication for the speech endpoint
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// Upstream Gemini TTS configuration
    pub gemini: GeminiConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
