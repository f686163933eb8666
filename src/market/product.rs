//! Product catalog: pair metadata, display formatting, channel names.

use rust_decimal::Decimal;

use crate::client::BitbankClient;
use crate::error::SdkError;
use crate::market::wire::SpotStatusData;
use crate::ops::private::SPOT_STATUS;
use crate::shared::Pair;

/// Display digit counts (price, volume) for the well-known pairs.
const PAIRS: &[(&str, u32, u32)] = &[
    ("btc_jpy", 0, 4),
    ("xrp_jpy", 3, 4),
    ("ltc_btc", 8, 4),
    ("eth_btc", 8, 4),
    ("mona_jpy", 3, 4),
    ("mona_btc", 8, 4),
    ("bcc_jpy", 0, 4),
    ("bcc_btc", 8, 4),
];

/// Digits for pairs known only from the live status listing.
const FALLBACK_DIGITS: (u32, u32) = (8, 4);

/// One tradable product and its display conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Display name, e.g. `"bitbank BTCJPY"`.
    pub name: String,
    pub code: Pair,
    pub price_digits: u32,
    pub volume_digits: u32,
}

impl Product {
    fn new(code: Pair, price_digits: u32, volume_digits: u32) -> Self {
        let name = format!(
            "bitbank {}",
            code.as_str().replace('_', "").to_uppercase()
        );
        Self {
            name,
            code,
            price_digits,
            volume_digits,
        }
    }

    pub fn format_price(&self, value: Decimal) -> String {
        format!("{:.*}", self.price_digits as usize, value)
    }

    pub fn format_volume(&self, value: Decimal) -> String {
        format!("{:.*}", self.volume_digits as usize, value)
    }

    pub fn ticker_channel(&self) -> String {
        format!("ticker_{}", self.code)
    }

    pub fn depth_whole_channel(&self) -> String {
        format!("depth_whole_{}", self.code)
    }

    pub fn depth_diff_channel(&self) -> String {
        format!("depth_diff_{}", self.code)
    }

    pub fn transactions_channel(&self) -> String {
        format!("transactions_{}", self.code)
    }

    pub fn candlestick_channel(&self) -> String {
        format!("candlestick_{}", self.code)
    }
}

/// Look a code up in the static table. Case-insensitive.
pub fn lookup(code: &str) -> Option<Product> {
    let code = code.to_lowercase();
    PAIRS
        .iter()
        .find(|(pair, _, _)| *pair == code)
        .map(|(pair, price, volume)| Product::new(Pair::from(*pair), *price, *volume))
}

/// Resolve a product code: static table first, then the live status
/// listing with fallback digits. Unknown codes are an error.
pub async fn resolve(client: &BitbankClient, code: &str) -> Result<Product, SdkError> {
    let code = code.to_lowercase();
    if let Some(product) = lookup(&code) {
        return Ok(product);
    }
    let response = client.request(&SPOT_STATUS).execute().await?;
    from_status(&code, response)
}

/// Blocking form of [`resolve`], for interactive call sites.
pub fn resolve_blocking(client: &BitbankClient, code: &str) -> Result<Product, SdkError> {
    let code = code.to_lowercase();
    if let Some(product) = lookup(&code) {
        return Ok(product);
    }
    let response = client.request(&SPOT_STATUS).execute_blocking()?;
    from_status(&code, response)
}

fn from_status(code: &str, response: serde_json::Value) -> Result<Product, SdkError> {
    let status: SpotStatusData = serde_json::from_value(response["data"].clone())?;
    if status.statuses.iter().any(|s| s.pair.as_str() == code) {
        let (price, volume) = FALLBACK_DIGITS;
        Ok(Product::new(Pair::from(code), price, volume))
    } else {
        Err(SdkError::InvalidProductCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_known_pair() {
        let product = lookup("btc_jpy").unwrap();
        assert_eq!(product.name, "bitbank BTCJPY");
        assert_eq!(product.code, Pair::from("btc_jpy"));
        assert_eq!(product.price_digits, 0);
        assert_eq!(product.volume_digits, 4);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(lookup("XRP_JPY").is_some());
        assert!(lookup("doge_jpy").is_none());
    }

    #[test]
    fn test_format_digits() {
        let btc = lookup("btc_jpy").unwrap();
        assert_eq!(btc.format_price("812000".parse().unwrap()), "812000");
        assert_eq!(btc.format_volume("1.5".parse().unwrap()), "1.5000");

        let xrp = lookup("xrp_jpy").unwrap();
        assert_eq!(xrp.format_price("50.1".parse().unwrap()), "50.100");
    }

    #[test]
    fn test_channel_names() {
        let product = lookup("mona_jpy").unwrap();
        assert_eq!(product.ticker_channel(), "ticker_mona_jpy");
        assert_eq!(product.depth_whole_channel(), "depth_whole_mona_jpy");
        assert_eq!(product.depth_diff_channel(), "depth_diff_mona_jpy");
        assert_eq!(product.transactions_channel(), "transactions_mona_jpy");
        assert_eq!(product.candlestick_channel(), "candlestick_mona_jpy");
    }

    #[test]
    fn test_from_status_listed_pair() {
        let response = json!({
            "success": 1,
            "data": {"statuses": [{"pair": "doge_jpy", "status": "NORMAL"}]}
        });
        let product = from_status("doge_jpy", response).unwrap();
        assert_eq!(product.name, "bitbank DOGEJPY");
        assert_eq!(product.price_digits, 8);
        assert_eq!(product.volume_digits, 4);
    }

    #[test]
    fn test_from_status_unknown_pair() {
        let response = json!({
            "success": 1,
            "data": {"statuses": [{"pair": "btc_jpy", "status": "NORMAL"}]}
        });
        let err = from_status("doge_jpy", response).unwrap_err();
        assert!(matches!(err, SdkError::InvalidProductCode(code) if code == "doge_jpy"));
    }
}
