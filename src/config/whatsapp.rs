//! WhatsApp Cloud API credentials and endpoints.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Versioned Graph API root.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// The business phone number that sends and receives messages.
    pub phone_number_id: String,
    pub access_token: SecretString,
    /// Shared token for the webhook subscription handshake.
    pub verify_token: SecretString,
    /// App secret for payload signature checks; unset disables them.
    #[serde(default)]
    pub app_secret: Option<SecretString>,
}

impl WhatsAppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phone_number_id.trim().is_empty() {
            return Err(ConfigError::invalid("whatsapp.phone_number_id is empty"));
        }
        if self.access_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::invalid("whatsapp.access_token is empty"));
        }
        if self.verify_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::invalid("whatsapp.verify_token is empty"));
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> WhatsAppConfig {
        WhatsAppConfig {
            api_base: default_api_base(),
            phone_number_id: "1234567890".to_string(),
            access_token: SecretString::new("token".to_string()),
            verify_token: SecretString::new("verify".to_string()),
            app_secret: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut config = valid();
        config.access_token = SecretString::new("  ".to_string());
        assert!(config.validate().is_err());

        let mut config = valid();
        config.phone_number_id = String::new();
        assert!(config.validate().is_err());
    }
}
