//! Payment notification webhooks
//!
//! The gateway POSTs a JSON body to the checkout's `webhook_url` and echoes the
//! checkout's secret in the `Webhook-Secret` header.

use crate::{NanoToError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

pub use crate::types::constants::WEBHOOK_SECRET_HEADER;

/// Status reported for a completed payment
pub const STATUS_COMPLETE: &str = "complete";

/// Payment method used by the payer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Currency symbol, e.g. `nano`
    pub symbol: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Body of a payment notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Checkout identifier
    pub id: String,
    /// Payment status
    pub status: String,
    /// Paid amount
    #[serde(default)]
    pub amount: Option<Value>,
    /// Payment method
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    /// Metadata sent with the checkout plus payment details
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl WebhookPayload {
    /// Decode a notification body
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| NanoToError::invalid_webhook_payload(e.to_string()))
    }

    /// Whether the payment completed
    pub fn is_complete(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_COMPLETE)
    }

    /// Block hash of the payment, when the gateway included it
    pub fn payment_hash(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .pointer("/payment/hash")?
            .as_str()
    }
}

/// Check the secret echoed by the gateway
///
/// An empty expected secret accepts every notification.
pub fn verify_secret(expected: &str, provided: Option<&str>) -> Result<()> {
    if expected.is_empty() {
        return Ok(());
    }

    match provided {
        Some(secret) if constant_time_eq(secret.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => {
            tracing::warn!("Rejected webhook with missing or mismatched secret");
            Err(NanoToError::InvalidWebhookSecret)
        }
    }
}

/// Compare two byte slices in constant time for equal lengths
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
