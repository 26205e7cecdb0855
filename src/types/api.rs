//! Informational API response types

use super::constants::units::{NANO_DECIMALS, RAW_PER_NANO};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Amount in raw units (10^-30 NANO)
///
/// The gateway sends raw amounts as decimal strings that overflow `u64` and
/// `Decimal`, so they are kept as `u128`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawAmount(pub u128);

impl RawAmount {
    /// Zero raw
    pub const ZERO: RawAmount = RawAmount(0);

    /// Format as a NANO amount with trailing zeros trimmed
    pub fn to_nano_string(&self) -> String {
        let whole = self.0 / RAW_PER_NANO;
        let fraction = self.0 % RAW_PER_NANO;
        if fraction == 0 {
            return whole.to_string();
        }
        let fraction = format!("{:0width$}", fraction, width = NANO_DECIMALS);
        format!("{}.{}", whole, fraction.trim_end_matches('0'))
    }

    /// Checked addition
    pub fn checked_add(self, other: RawAmount) -> Option<RawAmount> {
        self.0.checked_add(other.0).map(RawAmount)
    }
}

impl Add for RawAmount {
    type Output = RawAmount;

    fn add(self, other: RawAmount) -> RawAmount {
        RawAmount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RawAmount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u128>().map(RawAmount)
    }
}

impl Serialize for RawAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> de::Visitor<'de> for RawVisitor {
            type Value = RawAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a raw amount as an integer or decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawAmount, E> {
                Ok(RawAmount(v as u128))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<RawAmount, E> {
                Ok(RawAmount(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawAmount, E> {
                u128::try_from(v)
                    .map(RawAmount)
                    .map_err(|_| E::custom(format!("raw amount cannot be negative: {}", v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawAmount, E> {
                Err(E::custom(format!(
                    "raw amount {} is not an exact integer, send it as a string",
                    v
                )))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RawAmount, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

/// Conversion rate from `/price`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    /// Crypto symbol, e.g. `NANO`
    pub symbol: String,
    /// Price of one unit in `currency`
    pub price: Decimal,
    /// Fiat currency, e.g. `USD`
    pub currency: String,
    /// Quote time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Username alias from `/name/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
    pub address: String,
    pub namespace: String,
    #[serde(default)]
    pub expires: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// Account information from `/account/{address}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub address: Option<String>,
    /// Confirmed balance in NANO
    pub balance: Option<String>,
    pub balance_raw: Option<RawAmount>,
    /// Receivable balance in NANO
    pub pending: Option<String>,
    pub pending_raw: Option<RawAmount>,
    pub block_count: Option<String>,
    pub account_version: Option<String>,
    pub confirmation_height: Option<String>,
    pub representative: Option<String>,
    pub weight: Option<String>,
    pub usd_rate: Option<Decimal>,
    pub usd_value: Option<Decimal>,
}

/// Receivable block from `/pending/{address}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub amount: String,
    pub hash: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub amount_raw: Option<RawAmount>,
}

/// Block from `/history/{address}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    pub account: String,
    pub balance: String,
    pub hash: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Transaction matched by amount from `/payment/{address}/{amount}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    pub account: String,
    pub amount: String,
    pub balance: String,
    pub hash: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Combined balance of several accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalBalance {
    /// Confirmed balance in NANO
    pub balance: String,
    /// Receivable balance in NANO
    pub pending: String,
    pub balance_raw: RawAmount,
    pub pending_raw: RawAmount,
    /// USD value of the confirmed balance
    pub usd_value: Decimal,
}

impl Default for TotalBalance {
    fn default() -> Self {
        Self {
            balance: "0".to_string(),
            pending: "0".to_string(),
            balance_raw: RawAmount::ZERO,
            pending_raw: RawAmount::ZERO,
            usd_value: Decimal::ZERO,
        }
    }
}

impl TotalBalance {
    /// Add one account to the total. Missing fields count as zero.
    pub fn accumulate(&mut self, account: &AccountInfo) {
        self.balance_raw = self.balance_raw + account.balance_raw.unwrap_or_default();
        self.pending_raw = self.pending_raw + account.pending_raw.unwrap_or_default();
        self.usd_value += account.usd_value.unwrap_or_default();
        self.balance = self.balance_raw.to_nano_string();
        self.pending = self.pending_raw.to_nano_string();
    }
}
