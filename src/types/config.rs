//! Gateway configuration types

use super::constants::{currencies, DEFAULT_API_BASE_URL, DEFAULT_BASE_URL, ORDER_ID_PLACEHOLDER};
use crate::{NanoToError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::time::Duration;

/// Runtime environment of the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Local,
    Testing,
}

impl Environment {
    /// Parse an `APP_ENV` style value. Unknown values count as local.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Local,
        }
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Business name and branding shown on the checkout page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Business name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Publicly accessible logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Publicly accessible favicon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl Business {
    /// Create branding with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            logo: None,
            favicon: None,
        }
    }

    /// Set the logo URL
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Set the favicon URL
    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }
}

/// Characters escaped when the order id is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// URL sent to the gateway, optionally parameterised by the order id
///
/// Every `{id}` in the template is replaced with the percent-encoded order
/// id. A template without the placeholder is used as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlTarget(String);

impl UrlTarget {
    /// Create a new URL target
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template
    pub fn template(&self) -> &str {
        &self.0
    }

    /// Whether the template references the order id
    pub fn needs_order_id(&self) -> bool {
        self.0.contains(ORDER_ID_PLACEHOLDER)
    }

    /// Resolve the target for an order
    pub fn resolve(&self, order_id: Option<&str>) -> Result<String> {
        if !self.needs_order_id() {
            return Ok(self.0.clone());
        }
        match order_id {
            Some(id) => {
                let segment = utf8_percent_encode(id, PATH_SEGMENT).to_string();
                Ok(self.0.replace(ORDER_ID_PLACEHOLDER, &segment))
            }
            None => Err(NanoToError::MissingOrderId {
                target: self.0.clone(),
            }),
        }
    }
}

impl fmt::Display for UrlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UrlTarget {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UrlTarget {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Nano.to integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NanoToConfig {
    /// Checkout gateway base URL (without trailing slash)
    pub base_url: String,
    /// Informational API base URL (without trailing slash)
    pub api_base_url: String,
    /// Secret the gateway echoes back on webhook calls
    pub webhook_secret: String,
    /// Allowed currency symbols
    pub currencies: Vec<String>,
    /// Receiving addresses per currency symbol
    pub accounts: HashMap<String, Vec<String>>,
    /// Default checkout title
    pub title: String,
    /// Default checkout description, HTML allowed
    pub description: String,
    /// Business branding
    pub business: Option<Business>,
    /// Checkout background colours
    pub background: String,
    /// Checkout text colours
    pub color: String,
    /// Redirect target after a successful payment
    pub success_url: UrlTarget,
    /// Redirect target after a cancelled payment
    pub cancel_url: UrlTarget,
    /// Webhook target for payment notifications
    pub webhook_url: UrlTarget,
    /// Webhook target used outside production, e.g. a request inspector
    pub local_webhook_url: Option<String>,
    /// Host environment
    pub environment: Environment,
    /// Request timeout
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl Default for NanoToConfig {
    fn default() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(currencies::NANO.to_string(), Vec::new());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            webhook_secret: String::new(),
            currencies: vec![currencies::NANO.to_string()],
            accounts,
            title: "Order Payment".to_string(),
            description: "<b>Please make the payment as specified.</b>".to_string(),
            business: Some(Business::default()),
            background: "#FFFFFF,#1B9CFC".to_string(),
            color: "black,white".to_string(),
            success_url: UrlTarget::new("/order/success/{id}"),
            cancel_url: UrlTarget::new("/order/cancel/{id}"),
            webhook_url: UrlTarget::new("/order/webhook/{id}"),
            local_webhook_url: None,
            environment: Environment::Production,
            timeout: None,
        }
    }
}

impl NanoToConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config from defaults overridden by environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("NANO_TO_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(url) = env::var("NANO_TO_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(secret) = env::var("NANO_WEBHOOK_SECRET") {
            config.webhook_secret = secret;
        }
        if let Ok(accounts) = env::var("NANO_ACCOUNTS") {
            config
                .accounts
                .insert(currencies::NANO.to_string(), parse_account_list(&accounts));
        }
        if let Ok(name) = env::var("APP_NAME") {
            if !name.is_empty() {
                config.business.get_or_insert_with(Business::default).name = Some(name);
            }
        }
        if let Ok(environment) = env::var("APP_ENV") {
            config.environment = Environment::parse(&environment);
        }
        if let Ok(url) = env::var("NANO_TO_SUCCESS_URL") {
            config.success_url = UrlTarget::new(url);
        }
        if let Ok(url) = env::var("NANO_TO_CANCEL_URL") {
            config.cancel_url = UrlTarget::new(url);
        }
        if let Ok(url) = env::var("NANO_TO_WEBHOOK_URL") {
            config.webhook_url = UrlTarget::new(url);
        }
        if let Ok(url) = env::var("NANO_TO_LOCAL_WEBHOOK_URL") {
            if !url.is_empty() {
                config.local_webhook_url = Some(url);
            }
        }

        tracing::debug!(
            "Loaded Nano.to config from environment: base_url={}, environment={:?}",
            config.base_url,
            config.environment
        );

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_base_url("Base URL", &self.base_url)?;
        validate_base_url("API base URL", &self.api_base_url)?;

        if let Some(symbol) = self
            .currencies
            .iter()
            .find(|symbol| !currencies::is_supported(symbol))
        {
            return Err(NanoToError::UnsupportedCurrency {
                symbol: symbol.clone(),
            });
        }

        Ok(())
    }

    /// Receiving accounts configured for a currency symbol
    pub fn accounts_for(&self, symbol: &str) -> &[String] {
        self.accounts
            .get(symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a currency symbol is allowed
    pub fn allows_currency(&self, symbol: &str) -> bool {
        self.currencies.iter().any(|c| c == symbol)
    }

    /// Resolve the webhook URL for an order, honouring the local override
    pub fn resolve_webhook_url(&self, order_id: Option<&str>) -> Result<String> {
        if !self.environment.is_production() {
            if let Some(local) = self.local_webhook_url.as_deref().filter(|u| !u.is_empty()) {
                return Ok(local.to_string());
            }
        }
        self.webhook_url.resolve(order_id)
    }

    /// Set the checkout base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the webhook secret
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = secret.into();
        self
    }

    /// Set the allowed currencies
    pub fn with_currencies<I, S>(mut self, currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currencies = currencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the receiving accounts for a currency
    pub fn with_accounts<I, S>(mut self, symbol: impl Into<String>, accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accounts
            .insert(symbol.into(), accounts.into_iter().map(Into::into).collect());
        self
    }

    /// Set the default title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the default description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the business branding
    pub fn with_business(mut self, business: Business) -> Self {
        self.business = Some(business);
        self
    }

    /// Remove business branding
    pub fn without_business(mut self) -> Self {
        self.business = None;
        self
    }

    /// Set the background colours
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Set the text colours
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the success redirect target
    pub fn with_success_url(mut self, target: impl Into<UrlTarget>) -> Self {
        self.success_url = target.into();
        self
    }

    /// Set the cancel redirect target
    pub fn with_cancel_url(mut self, target: impl Into<UrlTarget>) -> Self {
        self.cancel_url = target.into();
        self
    }

    /// Set the webhook target
    pub fn with_webhook_url(mut self, target: impl Into<UrlTarget>) -> Self {
        self.webhook_url = target.into();
        self
    }

    /// Set the non-production webhook override
    pub fn with_local_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.local_webhook_url = Some(url.into());
        self
    }

    /// Set the host environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn validate_base_url(name: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(NanoToError::config(format!("{} cannot be empty", name)));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(NanoToError::config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }

    Ok(())
}

/// Split a comma separated account list
pub fn parse_account_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
