//! Webhook endpoints for the messaging transport.
//!
//! The transport redelivers anything not acknowledged quickly, so the POST
//! handler acknowledges as soon as the envelope is parsed and hands each
//! message to the dialog on a spawned task. Processing outcomes never feed
//! back into the HTTP response.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::domain::foundation::PhoneNumber;
use crate::ports::{InboundMessageHandler, MessageKind};

use super::signature::verify_signature;

const SIGNATURE_HEADER: &str = "x-hub-signature-256";

pub struct WebhookState {
    pub verify_token: SecretString,
    /// When set, POST deliveries must carry a valid payload signature.
    pub app_secret: Option<SecretString>,
    pub handler: Arc<dyn InboundMessageHandler>,
}

pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/webhook", get(verify_subscription).post(receive))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// The transport's one-time subscription handshake: echo the challenge iff
/// the verify token matches.
async fn verify_subscription(
    State(state): State<Arc<WebhookState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mode = params.get("hub.mode").map(String::as_str);
    let token = params.get("hub.verify_token").map(String::as_str);
    let challenge = params.get("hub.challenge").cloned();

    match (mode, token, challenge) {
        (Some("subscribe"), Some(token), Some(challenge))
            if token == state.verify_token.expose_secret() =>
        {
            info!("webhook subscription verified");
            (StatusCode::OK, challenge)
        }
        _ => {
            warn!("webhook subscription verification failed");
            (StatusCode::FORBIDDEN, String::new())
        }
    }
}

async fn receive(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(app_secret) = &state.app_secret {
        let header = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        if !verify_signature(app_secret.expose_secret().as_bytes(), &body, header) {
            warn!("rejected webhook delivery with bad signature");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let envelope: Envelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(error = %err, "undecodable webhook payload");
            return StatusCode::BAD_REQUEST;
        }
    };
    if envelope.object != "whatsapp_business_account" {
        debug!(object = %envelope.object, "ignoring webhook for other object");
        return StatusCode::OK;
    }

    for message in envelope.messages() {
        let sender = match PhoneNumber::new(message.from.as_str()) {
            Ok(sender) => sender,
            Err(err) => {
                warn!(error = %err, "webhook message with unusable sender");
                continue;
            }
        };
        let kind = MessageKind::from_transport(&message.kind);
        let text = message.text.map(|t| t.body).unwrap_or_default();
        let handler = Arc::clone(&state.handler);
        tokio::spawn(async move {
            handler.handle_incoming_message(sender, &text, kind).await;
        });
    }

    StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct Envelope {
    object: String,
    #[serde(default)]
    entry: Vec<Entry>,
}

impl Envelope {
    fn messages(self) -> impl Iterator<Item = InboundMessage> {
        self.entry
            .into_iter()
            .flat_map(|entry| entry.changes)
            .flat_map(|change| change.value.messages)
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    value: ChangeValue,
}

#[derive(Debug, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<InboundMessage>,
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    from: String,
    #[serde(rename = "type")]
    kind: String,
    text: Option<TextBody>,
}

#[derive(Debug, Deserialize)]
struct TextBody {
    body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    struct ChannelHandler {
        tx: mpsc::UnboundedSender<(PhoneNumber, String, MessageKind)>,
    }

    #[async_trait]
    impl InboundMessageHandler for ChannelHandler {
        async fn handle_incoming_message(
            &self,
            sender: PhoneNumber,
            text: &str,
            kind: MessageKind,
        ) {
            let _ = self.tx.send((sender, text.to_string(), kind));
        }
    }

    fn test_router(
        app_secret: Option<&str>,
    ) -> (
        Router,
        mpsc::UnboundedReceiver<(PhoneNumber, String, MessageKind)>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(WebhookState {
            verify_token: SecretString::new("verify-me".to_string()),
            app_secret: app_secret.map(|s| SecretString::new(s.to_string())),
            handler: Arc::new(ChannelHandler { tx }),
        });
        (router(state), rx)
    }

    fn delivery(body: &str) -> Request<Body> {
        Request::post("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn text_envelope(from: &str, body: &str) -> String {
        serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "changes": [{
                    "value": {
                        "messages": [{
                            "from": from,
                            "id": "wamid.test",
                            "type": "text",
                            "text": { "body": body }
                        }]
                    }
                }]
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn subscription_handshake_echoes_the_challenge() {
        let (app, _rx) = test_router(None);

        let response = app
            .oneshot(
                Request::get(
                    "/webhook?hub.mode=subscribe&hub.verify_token=verify-me&hub.challenge=12345",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"12345");
    }

    #[tokio::test]
    async fn subscription_handshake_rejects_a_wrong_token() {
        let (app, _rx) = test_router(None);

        let response = app
            .oneshot(
                Request::get(
                    "/webhook?hub.mode=subscribe&hub.verify_token=wrong&hub.challenge=12345",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn text_delivery_is_acknowledged_and_handed_off() {
        let (app, mut rx) = test_router(None);

        let response = app
            .oneshot(delivery(&text_envelope("15550001111", "Hi")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let (sender, text, kind) = rx.recv().await.unwrap();
        assert_eq!(sender, PhoneNumber::new("15550001111").unwrap());
        assert_eq!(text, "Hi");
        assert_eq!(kind, MessageKind::Text);
    }

    #[tokio::test]
    async fn non_text_messages_still_reach_the_handler_with_their_kind() {
        let (app, mut rx) = test_router(None);
        let envelope = serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "changes": [{
                    "value": {
                        "messages": [{
                            "from": "15550001111",
                            "id": "wamid.test",
                            "type": "image"
                        }]
                    }
                }]
            }]
        })
        .to_string();

        let response = app.oneshot(delivery(&envelope)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let (_, text, kind) = rx.recv().await.unwrap();
        assert_eq!(text, "");
        assert_eq!(kind, MessageKind::Other("image".to_string()));
    }

    #[tokio::test]
    async fn status_only_deliveries_are_acknowledged_quietly() {
        let (app, mut rx) = test_router(None);
        let envelope = serde_json::json!({
            "object": "whatsapp_business_account",
            "entry": [{ "changes": [{ "value": {} }] }]
        })
        .to_string();

        let response = app.oneshot(delivery(&envelope)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn undecodable_payload_is_a_bad_request() {
        let (app, _rx) = test_router(None);

        let response = app.oneshot(delivery("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsigned_delivery_is_rejected_when_a_secret_is_configured() {
        let (app, mut rx) = test_router(Some("app-secret"));

        let response = app
            .oneshot(delivery(&text_envelope("15550001111", "Hi")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn correctly_signed_delivery_passes_verification() {
        let (app, mut rx) = test_router(Some("app-secret"));
        let body = text_envelope("15550001111", "Hi");

        use hmac::{Hmac, Mac};
        let mut mac = Hmac::<sha2::Sha256>::new_from_slice(b"app-secret").unwrap();
        mac.update(body.as_bytes());
        let digest = mac.finalize().into_bytes();
        let signature = format!(
            "sha256={}",
            digest.iter().map(|b| format!("{b:02x}")).collect::<String>()
        );

        let request = Request::post("/webhook")
            .header("content-type", "application/json")
            .header("x-hub-signature-256", signature)
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn health_endpoint_answers() {
        let (app, _rx) = test_router(None);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
