//! Admin access settings.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Secret that unlocks the in-chat admin panel (`admin <secret>`).
    pub secret: SecretString,
}

impl AdminConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ConfigError::invalid("admin.secret is empty"));
        }
        if secret.contains(char::is_whitespace) {
            // The chat command splits on whitespace, so a secret containing
            // any could never be entered.
            return Err(ConfigError::invalid("admin.secret must not contain whitespace"));
        }
        Ok(())
    }
}
