//! Core types for the Nano.to integration
//!
//! This module defines the data structures shared by the checkout builder, the
//! informational API client and the webhook helpers.
//!
//! # Architecture
//!
//! The types module is organized as follows:
//! - [`config`] - Gateway configuration, branding and URL targets
//! - [`checkout`] - Checkout request body, gateway response and session
//! - [`api`] - Informational API response models and raw amounts
//! - [`constants`] - Gateway constants (base URLs, currencies, units)
//!
//! # Examples
//!
//! ## Configuration
//!
//! ```
//! use nano_to::types::{Business, NanoToConfig};
//!
//! # fn example() -> nano_to::Result<()> {
//! let config = NanoToConfig::new()
//!     .with_accounts("nano", ["nano_378shkx4k3wd5gxmj3xnjwuxtaf9xrehyz7ugakpiemh8arxq8w9a9xniush"])
//!     .with_webhook_secret("123456")
//!     .with_business(Business::new("My Company").with_logo("https://example.com/logo.png"))
//!     .with_success_url("https://shop.example/order/success/{id}");
//!
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Raw amounts
//!
//! ```
//! use nano_to::types::RawAmount;
//!
//! let raw: RawAmount = "21120000000000000000000000000".parse().unwrap();
//! assert_eq!(raw.to_nano_string(), "0.02112");
//! ```

pub mod api;
pub mod checkout;
pub mod config;
pub mod constants;

// Re-export commonly used types
pub use api::{
    AccountInfo, HistoryEntry, PendingBlock, Price, RawAmount, TotalBalance, Transaction,
    UsernameInfo,
};
pub use checkout::{CheckoutRequest, CheckoutResponse, CheckoutSession, Plan, SentRequest};
pub use config::{Business, Environment, NanoToConfig, UrlTarget};
pub use constants::{currencies, units, DEFAULT_API_BASE_URL, DEFAULT_BASE_URL};
