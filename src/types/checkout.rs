//! Checkout request and response types

use super::config::Business;
use crate::{NanoToError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Quick-pick plan offered on a donation style checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Label shown to the payer
    pub name: String,
    /// Price in USD
    pub price: Decimal,
}

impl Plan {
    /// Create a new plan
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Legacy `name:price` query form
    pub fn to_query_value(&self) -> String {
        format!("{}:{}", self.name, self.price.normalize())
    }
}

/// JSON body posted to the checkout gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Checkout title
    pub title: String,
    /// Checkout description, HTML allowed
    pub description: String,
    /// Redirect after payment
    pub success_url: String,
    /// Redirect on cancel
    pub cancel_url: String,
    /// Payment notification target
    pub webhook_url: String,
    /// Secret echoed back on the webhook
    pub webhook_secret: String,
    /// Background colours
    pub background: String,
    /// Text colours
    pub color: String,
    /// Whether QR codes should carry RAW amounts
    pub raw: bool,
    /// Fixed price in USD
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    /// Quick-pick plans, sent only when no fixed price is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<Plan>>,
    /// Branding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<Business>,
    /// Additional metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Custom checkout image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Gateway response to a checkout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Checkout identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Hosted checkout page
    #[serde(default)]
    pub url: Option<String>,
    /// Expiry of the checkout page
    #[serde(default)]
    pub exp: Option<DateTime<Utc>>,
}

/// What was sent to the gateway to obtain a session
#[derive(Debug, Clone, PartialEq)]
pub enum SentRequest {
    /// JSON body posted to the account URL
    Json(CheckoutRequest),
    /// Legacy GET URL with query parameters
    Query(String),
}

/// A created checkout session
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    /// Checkout identifier (JSON flow only)
    pub id: Option<String>,
    /// Hosted checkout page URL
    pub url: String,
    /// Expiry of the checkout page (JSON flow only)
    pub expires: Option<DateTime<Utc>>,
    /// Receiving address chosen for this session
    pub address: String,
    /// Request that produced this session
    pub request: SentRequest,
}

impl CheckoutSession {
    /// Hosted checkout page URL
    pub fn checkout_url(&self) -> &str {
        &self.url
    }

    /// JSON body that was posted, if the JSON flow was used
    pub fn payload(&self) -> Option<&CheckoutRequest> {
        match &self.request {
            SentRequest::Json(body) => Some(body),
            SentRequest::Query(_) => None,
        }
    }

    /// Legacy request URL, if the GET flow was used
    pub fn request_url(&self) -> Option<&str> {
        match &self.request {
            SentRequest::Json(_) => None,
            SentRequest::Query(url) => Some(url),
        }
    }

    /// Build a `302 Found` redirect to the checkout page
    pub fn send(&self) -> Result<http::Response<()>> {
        http::Response::builder()
            .status(http::StatusCode::FOUND)
            .header(http::header::LOCATION, &self.url)
            .body(())
            .map_err(|e| NanoToError::config(format!("Failed to create redirect response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn base_request() -> CheckoutRequest {
        CheckoutRequest {
            title: "Order Payment".to_string(),
            description: "<b>Pay</b>".to_string(),
            success_url: "https://shop.example/ok/1".to_string(),
            cancel_url: "https://shop.example/ko/1".to_string(),
            webhook_url: "https://shop.example/hook/1".to_string(),
            webhook_secret: String::new(),
            background: "#FFFFFF,#1B9CFC".to_string(),
            color: "black,white".to_string(),
            raw: false,
            price: None,
            plans: None,
            business: None,
            metadata: None,
            image: None,
        }
    }

    #[test]
    fn test_price_serializes_as_number() {
        let mut request = base_request();
        request.price = Some(Decimal::from_str("9.99").unwrap());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["price"], json!(9.99));
        assert!(value.get("plans").is_none());
        assert!(value.get("business").is_none());
        assert!(value.get("metadata").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_plans_serialize_prices_as_strings() {
        let mut request = base_request();
        request.plans = Some(vec![
            Plan::new("Coffee", Decimal::from(10)),
            Plan::new("Meal", Decimal::from(50)),
        ]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["plans"],
            json!([
                {"name": "Coffee", "price": "10"},
                {"name": "Meal", "price": "50"}
            ])
        );
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_plan_query_value() {
        let plan = Plan::new("Coffee", Decimal::from_str("10.50").unwrap());
        assert_eq!(plan.to_query_value(), "Coffee:10.5");
    }

    #[test]
    fn test_checkout_response_decoding() {
        let response: CheckoutResponse = serde_json::from_value(json!({
            "id": "test_id",
            "url": "https://example.com/1",
            "exp": "2021-10-10T01:51:23.853Z"
        }))
        .unwrap();

        assert_eq!(response.id.as_deref(), Some("test_id"));
        assert_eq!(response.url.as_deref(), Some("https://example.com/1"));
        assert!(response.exp.is_some());

        let response: CheckoutResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.url.is_none());
    }

    #[test]
    fn test_session_redirect() {
        let session = CheckoutSession {
            id: Some("test_id".to_string()),
            url: "https://example.com/1".to_string(),
            expires: None,
            address: "nano_3xxx".to_string(),
            request: SentRequest::Json(base_request()),
        };

        let response = session.send().unwrap();
        assert_eq!(response.status(), http::StatusCode::FOUND);
        assert_eq!(
            response.headers()[http::header::LOCATION],
            "https://example.com/1"
        );
        assert!(session.payload().is_some());
        assert!(session.request_url().is_none());
    }
}
