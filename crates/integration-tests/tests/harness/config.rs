//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use aria_config::{AuthConfig, Config, GeminiConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pointed at a mock Gemini backend
    pub fn new(gemini_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                auth: None,
                gemini: GeminiConfig {
                    api_key: SecretString::from("test-gemini-key"),
                    model: "gemini-2.5-flash-preview-tts".to_owned(),
                    base_url: Some(gemini_base_url.to_owned()),
                    timeout_seconds: 5,
                },
                telemetry: None,
            },
        }
    }

    /// Enable the auth gate with a comma-separated key set
    pub fn with_api_keys(mut self, keys: &str) -> Self {
        self.config.auth = Some(AuthConfig {
            enabled: true,
            api_keys: SecretString::from(keys),
            public_paths: vec![
                "/health".to_owned(),
                "/v1/audio/models".to_owned(),
                "/v1/audio/voices".to_owned(),
            ],
        });
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
