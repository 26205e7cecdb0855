//! Entry point bundling configuration and a shared HTTP client

use crate::api::NanoToApi;
use crate::checkout::Checkout;
use crate::types::{NanoToConfig, TotalBalance};
use crate::{NanoToError, Result};
use reqwest::Client;
use std::sync::Arc;

/// Nano.to client
///
/// Holds the configuration and one HTTP client that every checkout builder
/// and API call reuses.
#[derive(Debug, Clone)]
pub struct NanoTo {
    config: Arc<NanoToConfig>,
    client: Client,
}

impl NanoTo {
    /// Create a new client
    pub fn new(config: NanoToConfig) -> Result<Self> {
        // Validate configuration first
        config.validate()?;

        let client = build_http_client(&config)?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(NanoToConfig::from_env())
    }

    /// Start a new checkout
    pub fn checkout(&self) -> Checkout {
        Checkout::with_client(self.config.clone(), self.client.clone())
    }

    /// Informational API client sharing this client's connection pool
    pub fn api(&self) -> NanoToApi {
        NanoToApi::with_client(&self.config.api_base_url, self.client.clone())
    }

    /// Combined balance of the accounts configured for a currency
    pub async fn total_balance(&self, symbol: &str) -> Result<TotalBalance> {
        self.api()
            .total_balance(self.config.accounts_for(symbol))
            .await
    }

    /// Get the configuration
    pub fn config(&self) -> &NanoToConfig {
        &self.config
    }
}

/// Build the HTTP client used for gateway requests
pub(crate) fn build_http_client(config: &NanoToConfig) -> Result<Client> {
    let mut client_builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(timeout) = config.timeout {
        client_builder = client_builder.timeout(timeout);
    }

    client_builder
        .build()
        .map_err(|e| NanoToError::config(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let config = NanoToConfig::default()
            .with_accounts("nano", ["nano_3xxx"])
            .with_timeout(Duration::from_secs(10));
        let client = NanoTo::new(config).unwrap();

        assert_eq!(client.config().base_url, "https://nano.to");
        assert_eq!(client.api().base_url(), "https://api.nano.to");
        assert_eq!(client.checkout().config().accounts_for("nano").len(), 1);
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = NanoToConfig::default().with_base_url("nano.to");
        let err = NanoTo::new(config).unwrap_err();
        assert!(matches!(err, NanoToError::Config(_)));
    }
}
