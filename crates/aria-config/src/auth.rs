use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// API key authentication configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Whether API key auth is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Comma-separated set of accepted API keys
    pub api_keys: SecretString,

    /// Paths that skip authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

impl AuthConfig {
    /// The accepted key set, split on commas with surrounding whitespace
    /// trimmed and empty entries discarded
    pub fn accepted_keys(&self) -> Vec<String> {
        self.api_keys
            .expose_secret()
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/health".to_string(),
        "/v1/audio/models".to_string(),
        "/v1/audio/voices".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(keys: &str) -> AuthConfig {
        AuthConfig {
            enabled: true,
            api_keys: SecretString::from(keys),
            public_paths: default_public_paths(),
        }
    }

    #[test]
    fn keys_are_split_and_trimmed() {
        let keys = config("sk-one, sk-two ,sk-three").accepted_keys();
        assert_eq!(keys, ["sk-one", "sk-two", "sk-three"]);
    }

    #[test]
    fn empty_entries_are_discarded() {
        let keys = config("sk-one,,  ,sk-two,").accepted_keys();
        assert_eq!(keys, ["sk-one", "sk-two"]);
    }

    #[test]
    fn blank_value_yields_no_keys() {
        assert!(config("").accepted_keys().is_empty());
        assert!(config("  ").accepted_keys().is_empty());
    }
}
