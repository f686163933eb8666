//! Market state containers — app-owned, SDK-provided update logic.
//!
//! The feed and REST layers hand decoded payloads to these types; the
//! app owns the instances and decides when to render. Prices and sizes
//! are `Decimal`; derived ratios are `f64` so "no data" can be `NaN`.

pub mod book;
pub mod executions;
pub mod product;
pub mod ticker;
pub mod wire;

pub use book::OrderBook;
pub use executions::{Execution, ExecutionBuffer, ExecutionStats};
pub use product::Product;
pub use ticker::{Ticker, TickerBoard};
pub use wire::{DepthData, SpotStatusData, TickerData, TransactionData, TransactionsData};

/// Latest exchange status string, wholesale replaced on each update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Health {
    status: String,
}

impl Health {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_replaces_status() {
        let mut health = Health::new();
        assert_eq!(health.status(), "");
        health.update("NORMAL");
        health.update("BUSY");
        assert_eq!(health.status(), "BUSY");
    }
}
