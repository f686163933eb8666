//! Order-book aggregator with price-bucket grouping.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::market::wire::DepthData;

/// Depth snapshot holder with optional price grouping and bounded views.
///
/// The ungrouped maps always hold the full snapshot; grouping and the row
/// limit apply only to the [`bids`](Self::bids)/[`asks`](Self::asks) views.
#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: BTreeMap<Decimal, Decimal>,
    asks: BTreeMap<Decimal, Decimal>,
    /// Bucket width; zero disables grouping.
    factor: Decimal,
    row_count: usize,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            factor: Decimal::ZERO,
            row_count: 24,
        }
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_grouping_factor(&mut self, factor: Decimal) {
        self.factor = factor;
    }

    pub fn set_row_count(&mut self, rows: usize) {
        self.row_count = rows;
    }

    /// Replace the whole book with a new snapshot. No delta merging.
    pub fn set_snapshot(&mut self, data: &DepthData) {
        self.bids.clear();
        for (price, size) in &data.bids {
            self.bids.insert(*price, *size);
        }
        self.asks.clear();
        for (price, size) in &data.asks {
            self.asks.insert(*price, *size);
        }
    }

    /// Bid view: grouped rows sorted by price descending, first `row_count`.
    ///
    /// Bid buckets round down, so a bucket price is always attainable by
    /// the orders inside it.
    pub fn bids(&self) -> Vec<(Decimal, Decimal)> {
        let rows = self.rows(&self.bids, Decimal::floor);
        rows.into_iter().rev().take(self.row_count).collect()
    }

    /// Ask view: grouped rows sorted by price descending, keeping the last
    /// `row_count` (the levels nearest the spread). Ask buckets round up.
    pub fn asks(&self) -> Vec<(Decimal, Decimal)> {
        let rows: Vec<_> = self.rows(&self.asks, Decimal::ceil).into_iter().rev().collect();
        let skip = rows.len().saturating_sub(self.row_count);
        rows.into_iter().skip(skip).collect()
    }

    /// Total bid volume over total ask volume, on the ungrouped book.
    /// `NaN` when there is no ask volume.
    pub fn buy_sell_ratio(&self) -> f64 {
        let bid_volume: Decimal = self.bids.values().copied().sum();
        let ask_volume: Decimal = self.asks.values().copied().sum();
        if ask_volume.is_zero() {
            f64::NAN
        } else {
            (bid_volume / ask_volume).to_f64().unwrap_or(f64::NAN)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    fn rows(
        &self,
        side: &BTreeMap<Decimal, Decimal>,
        round: fn(&Decimal) -> Decimal,
    ) -> BTreeMap<Decimal, Decimal> {
        if self.factor.is_zero() {
            return side.clone();
        }
        let mut groups: BTreeMap<Decimal, Decimal> = BTreeMap::new();
        for (price, size) in side {
            let bucket = round(&(price / self.factor)) * self.factor;
            *groups.entry(bucket).or_insert(Decimal::ZERO) += *size;
        }
        groups
    }
}
