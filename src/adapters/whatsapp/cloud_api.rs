//! Outbound messaging through the WhatsApp Cloud API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::domain::foundation::{DispatchError, PhoneNumber};
use crate::ports::MessagingGateway;

#[derive(Serialize)]
struct TextPayload<'a> {
    preview_url: bool,
    body: &'a str,
}

#[derive(Serialize)]
struct MessageRequest<'a> {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextPayload<'a>,
}

/// Sends text messages through the Cloud API `/messages` endpoint.
pub struct CloudApiGateway {
    http: Client,
    api_base: String,
    phone_number_id: String,
    access_token: SecretString,
}

impl CloudApiGateway {
    /// `api_base` is the versioned Graph API root, e.g.
    /// `https://graph.facebook.com/v18.0`.
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        phone_number_id: impl Into<String>,
        access_token: SecretString,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            phone_number_id: phone_number_id.into(),
            access_token,
        }
    }
}

#[async_trait]
impl MessagingGateway for CloudApiGateway {
    async fn send(&self, recipient: &PhoneNumber, body: &str) -> Result<(), DispatchError> {
        let url = format!(
            "{}/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.phone_number_id
        );
        let request = MessageRequest {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to: recipient.as_str(),
            kind: "text",
            text: TextPayload {
                preview_url: false,
                body,
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| DispatchError::new(format!("cloud api request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::new(format!(
                "cloud api returned {status}: {detail}"
            )));
        }

        debug!(to = %recipient, "message dispatched");
        Ok(())
    }
}
