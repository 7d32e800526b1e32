//! Price Board
//!
//! Holds the book and history of many items, keyed by item name, and
//! estimates each of them independently.

use oracle_core::HistoryQuery;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::EstimatorConfig;
use crate::estimator::{PriceEstimate, PriceEstimator};
use crate::order_book::OrderBook;
use crate::trade_history::TradeHistory;

/// Everything known about one item at snapshot time
#[derive(Debug, Clone, Default)]
pub struct ItemSnapshot {
    pub book: OrderBook,
    pub history: TradeHistory,
}

impl ItemSnapshot {
    pub fn new(book: OrderBook, history: TradeHistory) -> Self {
        Self { book, history }
    }
}

/// Snapshots for a set of items
#[derive(Debug, Clone, Default)]
pub struct PriceBoard {
    items: BTreeMap<String, ItemSnapshot>,
    config: EstimatorConfig,
}

impl PriceBoard {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            items: BTreeMap::new(),
            config,
        }
    }

    /// Add or replace an item's snapshot
    pub fn insert(&mut self, name: impl Into<String>, snapshot: ItemSnapshot) {
        self.items.insert(name.into(), snapshot);
    }

    pub fn get(&self, name: &str) -> Option<&ItemSnapshot> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Estimate one item. `None` if the item is unknown or has no estimate.
    pub fn estimate(&self, name: &str, query: &HistoryQuery) -> Option<PriceEstimate> {
        let snapshot = self.items.get(name)?;
        PriceEstimator::with_config(&snapshot.book, &snapshot.history, self.config.clone())
            .estimate_with(query)
    }

    /// Estimate every item, in name order
    pub fn estimate_all(&self, query: &HistoryQuery) -> BTreeMap<String, Option<PriceEstimate>> {
        let estimates: BTreeMap<_, _> = self
            .items
            .iter()
            .map(|(name, snapshot)| {
                let estimate = PriceEstimator::with_config(
                    &snapshot.book,
                    &snapshot.history,
                    self.config.clone(),
                )
                .estimate_with(query);
                (name.clone(), estimate)
            })
            .collect();

        let priced = estimates.values().filter(|e| e.is_some()).count();
        info!("Estimated {}/{} items", priced, estimates.len());

        estimates
    }
}

impl FromIterator<(String, ItemSnapshot)> for PriceBoard {
    fn from_iter<I: IntoIterator<Item = (String, ItemSnapshot)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            config: EstimatorConfig::default(),
        }
    }
}
