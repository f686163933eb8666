//! Latest-value ticker cache, single pair and multi-pair board.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::market::wire::TickerData;

/// Latest ticker values for one pair.
///
/// `price_old` holds the price from the update before the current one, so
/// callers can render direction without keeping history themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticker {
    pub price: Decimal,
    pub price_old: Decimal,
    pub volume: Decimal,
    pub buy: Decimal,
    pub sell: Decimal,
    pub high: Decimal,
    pub low: Decimal,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &TickerData) {
        self.price_old = self.price;
        self.price = data.last;
        self.volume = data.vol;
        self.buy = data.buy;
        self.sell = data.sell;
        self.high = data.high;
        self.low = data.low;
    }
}

/// Tickers for a fixed set of channels, chosen at construction.
///
/// Updates for channels outside the set are dropped without effect.
#[derive(Debug, Clone, Default)]
pub struct TickerBoard {
    data: BTreeMap<String, Ticker>,
}

impl TickerBoard {
    pub fn new<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: channels
                .into_iter()
                .map(|c| (c.into(), Ticker::new()))
                .collect(),
        }
    }

    pub fn update(&mut self, channel: &str, data: &TickerData) {
        if let Some(ticker) = self.data.get_mut(channel) {
            ticker.update(data);
        }
    }

    pub fn get(&self, channel: &str) -> Option<&Ticker> {
        self.data.get(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker_data(last: &str) -> TickerData {
        TickerData {
            last: last.parse().unwrap(),
            vol: "12".parse().unwrap(),
            buy: "811999".parse().unwrap(),
            sell: "812001".parse().unwrap(),
            high: "820000".parse().unwrap(),
            low: "800000".parse().unwrap(),
            timestamp: None,
        }
    }

    #[test]
    fn test_update_keeps_previous_price() {
        let mut ticker = Ticker::new();
        ticker.update(&ticker_data("812000"));
        assert_eq!(ticker.price, "812000".parse().unwrap());
        assert_eq!(ticker.price_old, Decimal::ZERO);

        ticker.update(&ticker_data("813000"));
        assert_eq!(ticker.price, "813000".parse().unwrap());
        assert_eq!(ticker.price_old, "812000".parse().unwrap());
    }

    #[test]
    fn test_board_unknown_channel_is_noop() {
        let mut board = TickerBoard::new(["ticker_btc_jpy"]);
        board.update("ticker_xrp_jpy", &ticker_data("50"));
        assert!(board.get("ticker_xrp_jpy").is_none());
        assert_eq!(board.get("ticker_btc_jpy").unwrap().price, Decimal::ZERO);
    }

    #[test]
    fn test_board_updates_registered_channel() {
        let mut board = TickerBoard::new(["ticker_btc_jpy", "ticker_xrp_jpy"]);
        board.update("ticker_btc_jpy", &ticker_data("812000"));
        assert_eq!(
            board.get("ticker_btc_jpy").unwrap().price,
            "812000".parse().unwrap()
        );
        assert_eq!(board.get("ticker_xrp_jpy").unwrap().price, Decimal::ZERO);
    }
}
