//! Shared newtypes and enums used across all SDK modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the exchange sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Pair ────────────────────────────────────────────────────────────────────

/// Newtype for currency pair codes (e.g. `"btc_jpy"`).
///
/// Stored lower-cased, the form the exchange expects in paths and channels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair(String);

impl Pair {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Pair {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Pair {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl FromStr for Pair {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Pair::new(s))
    }
}

impl Serialize for Pair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Pair::new(s))
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Trade side: Buy or Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Case-insensitive parse ("BUY", "Sell", ...).
    pub fn parse(s: &str) -> Option<Side> {
        match s.to_lowercase().as_str() {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// ─── CandleType ──────────────────────────────────────────────────────────────

/// Candlestick aggregation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleType {
    #[default]
    #[serde(rename = "1min")]
    Min1,
    #[serde(rename = "5min")]
    Min5,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "1hour")]
    Hour1,
    #[serde(rename = "4hour")]
    Hour4,
    #[serde(rename = "8hour")]
    Hour8,
    #[serde(rename = "12hour")]
    Hour12,
    #[serde(rename = "1day")]
    Day1,
    #[serde(rename = "1week")]
    Week1,
}

impl CandleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Hour1 => "1hour",
            Self::Hour4 => "4hour",
            Self::Hour8 => "8hour",
            Self::Hour12 => "12hour",
            Self::Day1 => "1day",
            Self::Week1 => "1week",
        }
    }

    /// All wire names, in ascending window order.
    pub const NAMES: &'static [&'static str] = &[
        "1min", "5min", "15min", "30min", "1hour", "4hour", "8hour", "12hour", "1day", "1week",
    ];
}

impl std::fmt::Display for CandleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderType / SortOrder ───────────────────────────────────────────────────

/// Order execution type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

/// Listing sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lowercases() {
        let pair = Pair::new("BTC_JPY");
        assert_eq!(pair.as_str(), "btc_jpy");
    }

    #[test]
    fn test_pair_serde_transparent() {
        let pair = Pair::from("xrp_jpy");
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"xrp_jpy\"");
        let back: Pair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, back);
    }

    #[test]
    fn test_side_parse_case_insensitive() {
        assert_eq!(Side::parse("BUY"), Some(Side::Buy));
        assert_eq!(Side::parse("Sell"), Some(Side::Sell));
        assert_eq!(Side::parse("hold"), None);
    }

    #[test]
    fn test_side_serde() {
        let side: Side = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(side, Side::Buy);
    }

    #[test]
    fn test_candle_type_names_match_as_str() {
        for name in CandleType::NAMES {
            let parsed: CandleType = serde_json::from_str(&format!("\"{name}\"")).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }
}
