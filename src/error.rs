//! Error types for the Nano.to integration

use http::StatusCode;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, NanoToError>;

/// Errors raised while building, sending or receiving Nano.to payloads
#[derive(Debug, Error)]
pub enum NanoToError {
    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No receiving account configured for the requested currency
    #[error("Receiver Account was not available.")]
    NoReceiver { symbol: String },

    /// Requested currency is not in the allowed list
    #[error("Currency '{symbol}' is not supported")]
    UnsupportedCurrency { symbol: String },

    /// Amount below the gateway minimum
    #[error("Minimum allowed amount in USD is {minimum}")]
    AmountTooLow {
        minimum: rust_decimal::Decimal,
        amount: rust_decimal::Decimal,
    },

    /// A URL target needs an order id but none was supplied
    #[error("URL target '{target}' requires an order id")]
    MissingOrderId { target: String },

    /// The gateway answered but did not hand out a checkout URL
    #[error("Unable to load Checkout Page.")]
    CheckoutPageNotLoaded,

    /// The gateway answered with a non-success status
    #[error("Gateway request failed with status: {status}. Response: {body}")]
    Gateway { status: StatusCode, body: String },

    /// Webhook secret header missing or wrong
    #[error("Webhook secret mismatch")]
    InvalidWebhookSecret,

    /// Webhook body could not be decoded
    #[error("Webhook validation failed: {0}")]
    InvalidWebhookPayload(String),

    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl NanoToError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a gateway error from a status and response body
    pub fn gateway(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Gateway {
            status,
            body: body.into(),
        }
    }

    /// Create a webhook payload error
    pub fn invalid_webhook_payload(message: impl Into<String>) -> Self {
        Self::InvalidWebhookPayload(message.into())
    }

    /// HTTP status this error maps to when surfaced by a web handler
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidWebhookSecret => StatusCode::UNAUTHORIZED,
            Self::InvalidWebhookPayload(_) => StatusCode::BAD_REQUEST,
            Self::AmountTooLow { .. }
            | Self::UnsupportedCurrency { .. }
            | Self::MissingOrderId { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CheckoutPageNotLoaded | Self::Gateway { .. } | Self::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_messages_match_gateway_wording() {
        let err = NanoToError::NoReceiver {
            symbol: "nano".to_string(),
        };
        assert_eq!(err.to_string(), "Receiver Account was not available.");

        assert_eq!(
            NanoToError::CheckoutPageNotLoaded.to_string(),
            "Unable to load Checkout Page."
        );

        let err = NanoToError::AmountTooLow {
            minimum: Decimal::from_str("0.1").unwrap(),
            amount: Decimal::from_str("0.05").unwrap(),
        };
        assert_eq!(err.to_string(), "Minimum allowed amount in USD is 0.1");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            NanoToError::InvalidWebhookSecret.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            NanoToError::invalid_webhook_payload("missing id").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NanoToError::gateway(StatusCode::INTERNAL_SERVER_ERROR, "boom").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            NanoToError::config("bad").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
