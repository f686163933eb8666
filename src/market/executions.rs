//! Bounded execution history keyed by exchange-assigned id.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::market::wire::TransactionData;
use crate::shared::Side;

/// One executed trade, normalized from the wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub id: u64,
    pub time: DateTime<Utc>,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
}

impl From<&TransactionData> for Execution {
    fn from(tx: &TransactionData) -> Self {
        Self {
            id: tx.transaction_id,
            time: tx.executed_at,
            side: tx.side,
            price: tx.price,
            size: tx.amount,
        }
    }
}

/// Aggregate buy/sell volume over the buffered window.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionStats {
    pub buy_volume: Decimal,
    pub sell_volume: Decimal,
    /// Buy volume over sell volume; `NaN` when there is no sell volume.
    pub ratio: f64,
}

/// Capacity-bounded execution history.
///
/// Keyed by exchange id, so re-delivered trades upsert instead of
/// duplicating. When over capacity the smallest id (the oldest trade,
/// ids being assigned in execution order) is evicted.
#[derive(Debug, Clone)]
pub struct ExecutionBuffer {
    capacity: usize,
    data: BTreeMap<u64, Execution>,
}

impl Default for ExecutionBuffer {
    fn default() -> Self {
        Self {
            capacity: 48,
            data: BTreeMap::new(),
        }
    }
}

impl ExecutionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert or update one trade, evicting the smallest id if the buffer
    /// grew past capacity.
    pub fn apply(&mut self, tx: &TransactionData) {
        self.data.insert(tx.transaction_id, Execution::from(tx));
        while self.data.len() > self.capacity {
            self.data.pop_first();
        }
    }

    pub fn apply_all<'a>(&mut self, txs: impl IntoIterator<Item = &'a TransactionData>) {
        for tx in txs {
            self.apply(tx);
        }
    }

    /// Buffered executions, newest id first.
    pub fn all(&self) -> Vec<&Execution> {
        self.data.values().rev().collect()
    }

    pub fn stats(&self) -> ExecutionStats {
        let buy_volume: Decimal = self
            .data
            .values()
            .filter(|e| e.side == Side::Buy)
            .map(|e| e.size)
            .sum();
        let sell_volume: Decimal = self
            .data
            .values()
            .filter(|e| e.side == Side::Sell)
            .map(|e| e.size)
            .sum();
        let ratio = if sell_volume.is_zero() {
            f64::NAN
        } else {
            (buy_volume / sell_volume).to_f64().unwrap_or(f64::NAN)
        };
        ExecutionStats {
            buy_volume,
            sell_volume,
            ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(id: u64, side: Side, amount: &str) -> TransactionData {
        TransactionData {
            transaction_id: id,
            side,
            price: "812000".parse().unwrap(),
            amount: amount.parse().unwrap(),
            executed_at: Utc.timestamp_millis_opt(1514862245226).unwrap(),
        }
    }

    #[test]
    fn test_eviction_keeps_largest_ids() {
        let mut buffer = ExecutionBuffer::new();
        buffer.set_capacity(2);
        buffer.apply(&tx(5, Side::Buy, "1"));
        buffer.apply(&tx(3, Side::Buy, "1"));
        buffer.apply(&tx(7, Side::Buy, "1"));

        let ids: Vec<u64> = buffer.all().iter().map(|e| e.id).collect();
        assert_eq!(ids, [7, 5]);
    }

    #[test]
    fn test_upsert_does_not_grow() {
        let mut buffer = ExecutionBuffer::new();
        buffer.set_capacity(2);
        buffer.apply(&tx(5, Side::Buy, "1"));
        buffer.apply(&tx(5, Side::Sell, "2"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.all()[0].side, Side::Sell);
        assert_eq!(buffer.all()[0].size, "2".parse().unwrap());
    }

    #[test]
    fn test_all_newest_first() {
        let mut buffer = ExecutionBuffer::new();
        buffer.apply_all(&[
            tx(10, Side::Buy, "1"),
            tx(30, Side::Sell, "1"),
            tx(20, Side::Buy, "1"),
        ]);
        let ids: Vec<u64> = buffer.all().iter().map(|e| e.id).collect();
        assert_eq!(ids, [30, 20, 10]);
    }

    #[test]
    fn test_stats_volume_and_ratio() {
        let mut buffer = ExecutionBuffer::new();
        buffer.apply_all(&[
            tx(1, Side::Buy, "0.5"),
            tx(2, Side::Buy, "1.5"),
            tx(3, Side::Sell, "1.0"),
        ]);
        let stats = buffer.stats();
        assert_eq!(stats.buy_volume, "2.0".parse().unwrap());
        assert_eq!(stats.sell_volume, "1.0".parse().unwrap());
        assert_eq!(stats.ratio, 2.0);
    }

    #[test]
    fn test_stats_ratio_nan_without_sells() {
        let mut buffer = ExecutionBuffer::new();
        buffer.apply(&tx(1, Side::Buy, "1"));
        assert!(buffer.stats().ratio.is_nan());
        assert!(ExecutionBuffer::new().stats().ratio.is_nan());
    }
}
