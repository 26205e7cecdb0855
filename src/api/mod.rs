//! Read-only client for the Nano.to informational API
//!
//! Every endpoint is a plain GET returning JSON, so the client exposes one
//! typed [`NanoToApi::fetch`] over an [`Endpoint`] instead of a method per path.
//!
//! # Examples
//!
//! ```no_run
//! use nano_to::api::{Endpoint, NanoToApi};
//! use nano_to::types::{AccountInfo, Price};
//!
//! # async fn example() -> nano_to::Result<()> {
//! let api = NanoToApi::new("https://api.nano.to")?;
//!
//! let price: Price = api.fetch(&Endpoint::price("NANO", "USD")).await?;
//! println!("1 {} = {} {}", price.symbol, price.price, price.currency);
//!
//! let account: AccountInfo = api
//!     .fetch(&Endpoint::Account(
//!         "nano_37y6iq8m1zx9inwkkcgqh34kqsihzpjfwgp9jir8xpb9jrcwhkmoxpo61f4o".into(),
//!     ))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::types::{AccountInfo, TotalBalance, DEFAULT_API_BASE_URL};
use crate::{NanoToError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use url::Url;


/// Informational API endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Conversion rate, `/price?symbol=&currency=`
    Price { symbol: String, currency: String },
    /// Username alias, `/name/{username}`
    Username(String),
    /// Account information, `/account/{address}`
    Account(String),
    /// Receivable blocks, `/pending/{address}`
    Pending(String),
    /// Last 20 blocks, `/history/{address}`
    History(String),
    /// Transaction by amount in NANO, `/payment/{address}/{amount}`
    Payment { address: String, amount: String },
}

impl Endpoint {
    /// Price endpoint for a symbol and fiat currency
    pub fn price(symbol: impl Into<String>, currency: impl Into<String>) -> Self {
        Endpoint::Price {
            symbol: symbol.into(),
            currency: currency.into(),
        }
    }

    /// Payment lookup by amount
    pub fn payment(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Endpoint::Payment {
            address: address.into(),
            amount: amount.into(),
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Price { .. } => vec!["price"],
            Endpoint::Username(name) => vec!["name", name.as_str()],
            Endpoint::Account(address) => vec!["account", address.as_str()],
            Endpoint::Pending(address) => vec!["pending", address.as_str()],
            Endpoint::History(address) => vec!["history", address.as_str()],
            Endpoint::Payment { address, amount } => {
                vec!["payment", address.as_str(), amount.as_str()]
            }
        }
    }

    /// Full request URL below an API base
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url)?;

        url.path_segments_mut()
            .map_err(|_| {
                NanoToError::config(format!("API base URL cannot be a base: {}", base_url))
            })?
            .pop_if_empty()
            .extend(self.segments());

        if let Endpoint::Price { symbol, currency } = self {
            url.query_pairs_mut()
                .append_pair("symbol", symbol)
                .append_pair("currency", currency);
        }

        Ok(url)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::price("NANO", "USD")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}

/// Client for the informational API
#[derive(Debug, Clone)]
pub struct NanoToApi {
    base_url: String,
    client: Client,
}

impl NanoToApi {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| NanoToError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create an API client sharing an existing HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of this API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode its JSON body
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let url = endpoint.url(&self.base_url)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            tracing::error!(
                "API request {} failed with status: {}. Response body: {}",
                endpoint,
                status,
                response_body
            );
            return Err(NanoToError::gateway(status, response_body));
        }

        Ok(response.json().await?)
    }

    /// GET an endpoint as untyped JSON
    pub async fn fetch_value(&self, endpoint: &Endpoint) -> Result<Value> {
        self.fetch(endpoint).await
    }

    /// Combined balance of several accounts
    pub async fn total_balance(&self, accounts: &[String]) -> Result<TotalBalance> {
        let mut total = TotalBalance::default();

        for address in accounts {
            let info: AccountInfo = self.fetch(&Endpoint::Account(address.clone())).await?;
            total.accumulate(&info);
        }

        tracing::debug!(
            "Total balance of {} accounts: {} NANO ({} pending)",
            accounts.len(),
            total.balance,
            total.pending
        );

        Ok(total)
    }
}

impl Default for NanoToApi {
    fn default() -> Self {
        Self::with_client(DEFAULT_API_BASE_URL, Client::new())
    }
}
