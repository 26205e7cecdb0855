//! # Nano.to for Rust
//!
//! A typed client for the [Nano.to](https://nano.to) hosted checkout gateway
//! and its read-only informational API.
//!
//! ## Features
//!
//! - **Hosted checkout**: Fluent builder that posts a checkout request and returns the payment page URL
//! - **Donation plans**: Offer quick-pick amounts instead of a fixed price
//! - **Random receivers**: Spread payments over several configured accounts
//! - **Informational API**: Prices, usernames, account balances, pending blocks and history
//! - **Webhooks**: Typed payment notifications with secret verification
//! - **Axum integration**: Redirect responses and a verified webhook extractor (default feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nano_to::{NanoTo, NanoToConfig};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NanoToConfig::from_env()
//!         .with_accounts("nano", ["nano_3xxx"])
//!         .with_webhook_secret("123456")
//!         .with_success_url("https://shop.example/order/success/{id}")
//!         .with_cancel_url("https://shop.example/order/cancel/{id}")
//!         .with_webhook_url("https://shop.example/order/webhook/{id}");
//!     let nano_to = NanoTo::new(config)?;
//!
//!     let session = nano_to
//!         .checkout()
//!         .info(Some("Payment for Subscription"), None)
//!         .amount(Decimal::from_str("9.99")?)?
//!         .create(Some("1001"))
//!         .await?;
//!     println!("Checkout page: {}", session.url);
//!
//!     let balance = nano_to.total_balance("nano").await?;
//!     println!("Received so far: {} NANO", balance.balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Configuration, checkout and API data structures
//! - **`checkout`**: Checkout builder and gateway requests
//! - **`api`**: Informational API client
//! - **`client`**: Entry point sharing config and HTTP client
//! - **`webhook`**: Payment notification decoding and secret checks
//! - **`error`**: Error type shared by every module
//! - **`axum`**: Axum responses and extractors (feature-gated)
//!
//! ## Optional Features
//!
//! - **`axum`**: Enable Axum web framework integration (default)

pub mod api;
pub mod checkout;
pub mod client;
pub mod error;
pub mod types;
pub mod webhook;

// Re-exports for convenience
pub use api::{Endpoint, NanoToApi};
pub use checkout::Checkout;
pub use client::NanoTo;
pub use error::{NanoToError, Result};
pub use types::*;
pub use webhook::WebhookPayload;

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

/// Current version of the nano-to library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
