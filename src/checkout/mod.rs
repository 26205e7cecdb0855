//! Hosted checkout builder
//!
//! This module assembles checkout requests for the Nano.to gateway and turns
//! the gateway's answer into a [`CheckoutSession`] holding the hosted payment
//! page URL.
//!
//! # Examples
//!
//! ## Fixed price checkout
//!
//! ```no_run
//! use nano_to::{NanoTo, NanoToConfig};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> nano_to::Result<()> {
//! let config = NanoToConfig::from_env()
//!     .with_success_url("https://shop.example/order/success/{id}")
//!     .with_cancel_url("https://shop.example/order/cancel/{id}")
//!     .with_webhook_url("https://shop.example/order/webhook/{id}");
//! let nano_to = NanoTo::new(config)?;
//!
//! let session = nano_to
//!     .checkout()
//!     .info(Some("Payment for Subscription"), None)
//!     .amount(Decimal::new(999, 2))?
//!     .metadata(serde_json::json!({ "payment_type": "monthly" }))
//!     .create(Some("order-1001"))
//!     .await?;
//!
//! println!("Send the customer to {}", session.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Donation style checkout
//!
//! ```no_run
//! use nano_to::{NanoTo, Plan};
//! use rust_decimal::Decimal;
//!
//! # async fn example(nano_to: NanoTo) -> nano_to::Result<()> {
//! let session = nano_to
//!     .checkout()
//!     .suggest(vec![
//!         Plan::new("Coffee", Decimal::from(10)),
//!         Plan::new("Meal", Decimal::from(50)),
//!     ])
//!     .create(Some("donation-7"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::types::{
    units, Business, CheckoutRequest, CheckoutResponse, CheckoutSession, NanoToConfig, Plan,
    SentRequest,
};
use crate::{NanoToError, Result};
use rand::seq::SliceRandom;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use url::Url;


/// Fluent builder for a single checkout session
#[derive(Debug, Clone)]
pub struct Checkout {
    config: Arc<NanoToConfig>,
    client: Client,
    title: String,
    description: String,
    amount: Option<Decimal>,
    suggest: Option<Vec<Plan>>,
    business: Option<Business>,
    webhook_secret: String,
    symbol: String,
    metadata: Option<Value>,
    raw: bool,
    background: String,
    color: String,
    image: Option<String>,
}

impl Checkout {
    /// Create a builder with its own HTTP client
    pub fn new(config: NanoToConfig) -> Result<Self> {
        config.validate()?;
        let client = crate::client::build_http_client(&config)?;
        Ok(Self::with_client(Arc::new(config), client))
    }

    /// Create a builder sharing an existing HTTP client
    pub fn with_client(config: Arc<NanoToConfig>, client: Client) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            amount: None,
            suggest: None,
            business: config.business.clone(),
            webhook_secret: config.webhook_secret.clone(),
            symbol: crate::types::currencies::NANO.to_string(),
            metadata: None,
            raw: false,
            background: config.background.clone(),
            color: config.color.clone(),
            image: None,
            config,
            client,
        }
    }

    /// Set the title and description. `None` keeps the current value.
    pub fn info(mut self, title: Option<&str>, description: Option<&str>) -> Self {
        if let Some(title) = title {
            self.title = title.to_string();
        }
        if let Some(description) = description {
            self.description = description.to_string();
        }
        self
    }

    /// Set a fixed price in USD. Takes precedence over [`Checkout::suggest`].
    pub fn amount(mut self, amount: Decimal) -> Result<Self> {
        let minimum = units::minimum_amount_usd();
        if amount < minimum {
            return Err(NanoToError::AmountTooLow { minimum, amount });
        }
        self.amount = Some(amount);
        Ok(self)
    }

    /// Offer quick-pick plans, useful for donations
    pub fn suggest(mut self, plans: Vec<Plan>) -> Self {
        self.suggest = Some(plans);
        self
    }

    /// Override the configured business branding
    pub fn business(mut self, business: Business) -> Self {
        self.business = Some(business);
        self
    }

    /// Use a custom webhook secret
    pub fn secret(mut self, secret: impl ToString) -> Self {
        self.webhook_secret = secret.to_string();
        self
    }

    /// Attach metadata to the request body
    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Generate RAW friendly QR codes (e.g. for Natrium)
    pub fn as_raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// Override the background colours
    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Override the text colours
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Show a custom image on the checkout page
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image = Some(image_url.into());
        self
    }

    /// Pay in another configured currency
    pub fn symbol(mut self, symbol: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into().to_lowercase();
        if !self.config.allows_currency(&symbol) {
            return Err(NanoToError::UnsupportedCurrency { symbol });
        }
        self.symbol = symbol;
        Ok(self)
    }

    /// The configuration this builder reads defaults from
    pub fn config(&self) -> &NanoToConfig {
        &self.config
    }

    /// Build the JSON body without sending it
    pub fn payload(&self, order_id: Option<&str>) -> Result<CheckoutRequest> {
        let (price, plans) = match (self.amount, &self.suggest) {
            (Some(amount), _) => (Some(amount), None),
            (None, Some(plans)) if !plans.is_empty() => (None, Some(plans.clone())),
            _ => (None, None),
        };

        Ok(CheckoutRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            success_url: self.config.success_url.resolve(order_id)?,
            cancel_url: self.config.cancel_url.resolve(order_id)?,
            webhook_url: self.config.resolve_webhook_url(order_id)?,
            webhook_secret: self.webhook_secret.clone(),
            background: self.background.clone(),
            color: self.color.clone(),
            raw: self.raw,
            price,
            plans,
            business: self
                .business
                .clone()
                .filter(|business| *business != Business::default()),
            metadata: self.metadata.clone().filter(|metadata| !is_empty_json(metadata)),
            image: self.image.clone().filter(|image| !image.is_empty()),
        })
    }

    /// Create the checkout session by posting the JSON body to the gateway
    pub async fn create(&self, order_id: Option<&str>) -> Result<CheckoutSession> {
        let address = self.pick_account()?;
        let body = self.payload(order_id)?;
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), address);

        tracing::debug!(
            "Checkout request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
        tracing::debug!("Sending checkout request to: {}", url);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            tracing::error!(
                "Checkout request failed with status: {}. Response body: {}",
                status,
                response_body
            );
            return Err(NanoToError::gateway(status, response_body));
        }

        let checkout: CheckoutResponse = response.json().await?;
        let checkout_url = checkout
            .url
            .filter(|url| !url.is_empty())
            .ok_or(NanoToError::CheckoutPageNotLoaded)?;

        tracing::info!(
            "Checkout session created for order {:?}: {}",
            order_id,
            checkout_url
        );

        Ok(CheckoutSession {
            id: checkout.id,
            url: checkout_url,
            expires: checkout.exp,
            address,
            request: SentRequest::Json(body),
        })
    }

    /// Create the checkout session with the legacy GET flow
    ///
    /// The gateway redirects to the hosted page, so the checkout URL is the
    /// final URL after redirects. Only title, description, URLs, secret, raw
    /// flag and price or plans are sent.
    #[deprecated(note = "use `create`, which posts JSON and supports every checkout option")]
    pub async fn create_with_get_request(&self, order_id: Option<&str>) -> Result<CheckoutSession> {
        let address = self.pick_account()?;
        let request_url = self.query_url(&address, order_id)?;

        tracing::debug!("Sending legacy checkout request to: {}", request_url);

        let response = self.client.get(request_url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            tracing::error!(
                "Legacy checkout request failed with status: {}. Response body: {}",
                status,
                response_body
            );
            return Err(NanoToError::gateway(status, response_body));
        }

        let final_url = response.url().clone();
        if final_url == request_url {
            tracing::error!("Legacy checkout request was not redirected to a checkout page");
            return Err(NanoToError::CheckoutPageNotLoaded);
        }

        tracing::info!(
            "Checkout session created for order {:?}: {}",
            order_id,
            final_url
        );

        Ok(CheckoutSession {
            id: None,
            url: final_url.to_string(),
            expires: None,
            address,
            request: SentRequest::Query(request_url.to_string()),
        })
    }

    /// Pick one receiving account at random
    fn pick_account(&self) -> Result<String> {
        self.config
            .accounts_for(&self.symbol)
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| NanoToError::NoReceiver {
                symbol: self.symbol.clone(),
            })
    }

    /// Legacy GET URL carrying the checkout parameters as a query string
    fn query_url(&self, address: &str, order_id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            address
        ))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("title", &self.title)
                .append_pair("description", &self.description)
                .append_pair("success_url", &self.config.success_url.resolve(order_id)?)
                .append_pair("cancel_url", &self.config.cancel_url.resolve(order_id)?)
                .append_pair("webhook_url", &self.config.resolve_webhook_url(order_id)?)
                .append_pair("webhook_secret", &self.webhook_secret)
                .append_pair("raw", if self.raw { "true" } else { "false" });

            if let Some(amount) = self.amount {
                query.append_pair("price", &amount.normalize().to_string());
            } else if let Some(plans) = self.suggest.as_ref().filter(|p| !p.is_empty()) {
                let suggest = plans
                    .iter()
                    .map(Plan::to_query_value)
                    .collect::<Vec<_>>()
                    .join(",");
                query.append_pair("suggest", &suggest);
            }
        }

        Ok(url)
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
