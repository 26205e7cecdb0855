//! Common constants for the Nano.to gateway

/// Default checkout gateway base URL
pub const DEFAULT_BASE_URL: &str = "https://nano.to";

/// Default informational API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.nano.to";

/// Header carrying the webhook secret on gateway callbacks
pub const WEBHOOK_SECRET_HEADER: &str = "Webhook-Secret";

/// Placeholder replaced by the order id in URL targets
pub const ORDER_ID_PLACEHOLDER: &str = "{id}";

/// Supported currency symbols
pub mod currencies {
    /// Nano
    pub const NANO: &str = "nano";

    /// Check if a currency symbol is known to the gateway
    pub fn is_supported(symbol: &str) -> bool {
        matches!(symbol, NANO)
    }

    /// Get all supported currency symbols
    pub fn all_supported() -> Vec<&'static str> {
        vec![NANO]
    }
}

/// Amount units
pub mod units {
    use rust_decimal::Decimal;

    /// Raw units in one NANO (10^30)
    pub const RAW_PER_NANO: u128 = 1_000_000_000_000_000_000_000_000_000_000;

    /// Decimal places of a NANO amount expressed in raw
    pub const NANO_DECIMALS: usize = 30;

    /// Minimum checkout amount in USD
    pub fn minimum_amount_usd() -> Decimal {
        Decimal::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currencies() {
        assert!(currencies::is_supported("nano"));
        assert!(!currencies::is_supported("btc"));
        assert_eq!(currencies::all_supported(), vec!["nano"]);
    }

    #[test]
    fn test_units() {
        assert_eq!(units::RAW_PER_NANO, 10u128.pow(units::NANO_DECIMALS as u32));
        assert_eq!(units::minimum_amount_usd().to_string(), "0.1");
    }
}
