//! Wire types for market data, shared by REST responses and feed payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::serde_util::timestamp_ms;
use crate::shared::{Pair, Side};

/// Depth payload: `[price, size]` string pairs, best levels first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepthData {
    pub bids: Vec<(Decimal, Decimal)>,
    pub asks: Vec<(Decimal, Decimal)>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// One executed trade as the exchange reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionData {
    pub transaction_id: u64,
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(with = "timestamp_ms")]
    pub executed_at: DateTime<Utc>,
}

/// Batch wrapper used by both the REST endpoint and the feed channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionsData {
    pub transactions: Vec<TransactionData>,
}

/// Ticker payload. All prices arrive as numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerData {
    pub last: Decimal,
    pub vol: Decimal,
    pub buy: Decimal,
    pub sell: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Exchange status listing, one entry per tradable pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotStatusData {
    pub statuses: Vec<PairStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairStatus {
    pub pair: Pair,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_depth() {
        let data: DepthData = serde_json::from_str(
            r#"{
                "bids": [["999000", "0.5"], ["998000", "1.2"]],
                "asks": [["1000000", "0.3"]],
                "timestamp": 1514862245226
            }"#,
        )
        .unwrap();
        assert_eq!(data.bids.len(), 2);
        assert_eq!(data.bids[0].0, "999000".parse().unwrap());
        assert_eq!(data.asks[0].1, "0.3".parse().unwrap());
    }

    #[test]
    fn test_decode_transaction() {
        let tx: TransactionData = serde_json::from_str(
            r#"{
                "transaction_id": 113789,
                "side": "buy",
                "price": "812000",
                "amount": "0.0500",
                "executed_at": 1514862245226
            }"#,
        )
        .unwrap();
        assert_eq!(tx.transaction_id, 113789);
        assert_eq!(tx.side, Side::Buy);
        assert_eq!(
            tx.executed_at,
            Utc.timestamp_millis_opt(1514862245226).unwrap()
        );
    }

    #[test]
    fn test_decode_ticker() {
        let ticker: TickerData = serde_json::from_str(
            r#"{
                "last": "812000", "vol": "12.3", "buy": "811999",
                "sell": "812001", "high": "820000", "low": "800000"
            }"#,
        )
        .unwrap();
        assert_eq!(ticker.last, "812000".parse().unwrap());
        assert!(ticker.timestamp.is_none());
    }

    #[test]
    fn test_decode_spot_status() {
        let status: SpotStatusData = serde_json::from_str(
            r#"{"statuses": [{"pair": "btc_jpy", "status": "NORMAL"}]}"#,
        )
        .unwrap();
        assert_eq!(status.statuses[0].pair, Pair::from("btc_jpy"));
    }
}
