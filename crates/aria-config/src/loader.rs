use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream credential is missing, the upstream
    /// deadline is zero, or auth is enabled without any accepted keys
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gemini.api_key.expose_secret().is_empty() {
            anyhow::bail!("gemini.api_key must not be empty");
        }

        if self.gemini.timeout_seconds == 0 {
            anyhow::bail!("gemini.timeout_seconds must be greater than 0");
        }

        if let Some(ref auth) = self.auth
            && auth.enabled
            && auth.accepted_keys().is_empty()
        {
            anyhow::bail!("auth.api_keys must contain at least one key when auth is enabled");
        }

        Ok(())
    }
}
