//! Axum integration
//!
//! - [`CheckoutSession`] responds with a `302 Found` redirect to the hosted
//!   checkout page.
//! - [`NanoToError`] responds with a JSON error body and a matching status.
//! - [`VerifiedWebhook`] extracts a payment notification after checking the
//!   `Webhook-Secret` header against the [`WebhookSecret`] in router state.
//!
//! # Example
//!
//! ```no_run
//! use axum::{extract::{Path, State}, routing::{get, post}, Router};
//! use nano_to::axum::{VerifiedWebhook, WebhookSecret};
//! use nano_to::{CheckoutSession, NanoTo};
//!
//! #[derive(Clone)]
//! struct AppState {
//!     nano_to: NanoTo,
//!     secret: WebhookSecret,
//! }
//!
//! impl axum::extract::FromRef<AppState> for WebhookSecret {
//!     fn from_ref(state: &AppState) -> Self {
//!         state.secret.clone()
//!     }
//! }
//!
//! async fn pay(
//!     State(state): State<AppState>,
//!     Path(id): Path<String>,
//! ) -> nano_to::Result<CheckoutSession> {
//!     state.nano_to.checkout().create(Some(&id)).await
//! }
//!
//! async fn webhook(Path(id): Path<String>, VerifiedWebhook(payload): VerifiedWebhook) -> &'static str {
//!     if payload.is_complete() {
//!         tracing::info!("order {} paid", id);
//!     }
//!     "ok"
//! }
//!
//! # fn build(nano_to: NanoTo) -> Router {
//! let secret = WebhookSecret::from(nano_to.config());
//! Router::new()
//!     .route("/order/pay/{id}", get(pay))
//!     .route("/order/webhook/{id}", post(webhook))
//!     .with_state(AppState { nano_to, secret })
//! # }
//! ```

use crate::types::{CheckoutSession, NanoToConfig};
use crate::webhook::{verify_secret, WebhookPayload, WEBHOOK_SECRET_HEADER};
use crate::NanoToError;
use axum::{
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

impl IntoResponse for NanoToError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Nano.to request failed: {}", self);
        }

        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

impl IntoResponse for CheckoutSession {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.url)]).into_response()
    }
}

/// Secret expected in the `Webhook-Secret` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookSecret(pub String);

impl WebhookSecret {
    /// Create a new webhook secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl From<&NanoToConfig> for WebhookSecret {
    fn from(config: &NanoToConfig) -> Self {
        Self(config.webhook_secret.clone())
    }
}

/// Payment notification whose secret header matched
#[derive(Debug, Clone)]
pub struct VerifiedWebhook(pub WebhookPayload);

impl<S> FromRequest<S> for VerifiedWebhook
where
    WebhookSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = NanoToError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let expected = WebhookSecret::from_ref(state);
        let provided = req
            .headers()
            .get(WEBHOOK_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        verify_secret(&expected.0, provided.as_deref())?;

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| NanoToError::invalid_webhook_payload(e.body_text()))?;

        let payload = WebhookPayload::from_slice(&body).map_err(|e| {
            tracing::warn!("Rejected webhook: {}", e);
            e
        })?;

        tracing::info!(
            "Webhook received for checkout {} with status {}",
            payload.id,
            payload.status
        );

        Ok(VerifiedWebhook(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentRequest;
    use axum::{body::Body, extract::Path, routing::post, Router};
    use serde_json::json;
    use tower::ServiceExt;

    async fn webhook_handler(
        Path(id): Path<String>,
        VerifiedWebhook(payload): VerifiedWebhook,
    ) -> String {
        format!("webhook - {} {}", id, payload.status)
    }

    fn app(secret: &str) -> Router {
        Router::new()
            .route("/order/webhook/{id}", post(webhook_handler))
            .with_state(WebhookSecret::new(secret))
    }

    fn webhook_request(secret: Option<&str>, body: String) -> Request {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/order/webhook/some-id")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(secret) = secret {
            builder = builder.header(WEBHOOK_SECRET_HEADER, secret);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn complete_payment() -> String {
        json!({
            "id": "ffceexxxxxx",
            "status": "complete",
            "amount": "10",
            "method": { "symbol": "nano" },
            "metadata": { "payment": { "hash": "ABCD" } }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_webhook_accepts_matching_secret() {
        let response = app("123456")
            .oneshot(webhook_request(Some("123456"), complete_payment()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "webhook - some-id complete");
    }

    #[tokio::test]
    async fn test_webhook_rejects_wrong_secret() {
        let response = app("123456")
            .oneshot(webhook_request(Some("nope"), complete_payment()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_webhook_rejects_empty_body() {
        let response = app("")
            .oneshot(webhook_request(None, String::new()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("validation failed"));
    }

    #[tokio::test]
    async fn test_checkout_session_redirects() {
        let session = CheckoutSession {
            id: Some("test_id".to_string()),
            url: "https://example.com/test_id".to_string(),
            expires: None,
            address: "nano_3xxx".to_string(),
            request: SentRequest::Query("https://nano.to/nano_3xxx?title=x".to_string()),
        };

        let response = session.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/test_id"
        );
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = NanoToError::NoReceiver {
            symbol: "nano".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Receiver Account was not available.");
    }
}
