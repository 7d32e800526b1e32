//! Order book snapshot for a single item
//!
//! Only orders that are visible and whose owner is in session can be traded
//! against right now, so every query ignores the rest.

use itertools::Itertools;
use oracle_core::{OrderLevel, OrderRecord, OrderSide, RankFilter};
use serde::{Deserialize, Serialize};

/// Snapshot of the live orders for one item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    orders: Vec<OrderRecord>,
}

impl OrderBook {
    pub fn new(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn eligible<'a>(
        &'a self,
        side: OrderSide,
        ranks: &'a RankFilter,
    ) -> impl Iterator<Item = &'a OrderRecord> + 'a {
        self.orders
            .iter()
            .filter(move |order| order.is_eligible(side, ranks))
    }

    /// Lowest eligible sell price
    pub fn best_sell_price(&self, ranks: &RankFilter) -> Option<u32> {
        self.eligible(OrderSide::Sell, ranks).map(|o| o.price).min()
    }

    /// Highest eligible buy price
    pub fn best_buy_price(&self, ranks: &RankFilter) -> Option<u32> {
        self.eligible(OrderSide::Buy, ranks).map(|o| o.price).max()
    }

    /// The `k` cheapest eligible sell orders, cheapest first
    pub fn bottom_k_sell(&self, k: usize, ranks: &RankFilter) -> Vec<OrderLevel> {
        self.eligible(OrderSide::Sell, ranks)
            .map(OrderRecord::level)
            .sorted_by_key(|level| (level.price, level.quantity))
            .take(k)
            .collect()
    }

    /// The `k` highest eligible buy orders, highest first
    pub fn top_k_buy(&self, k: usize, ranks: &RankFilter) -> Vec<OrderLevel> {
        self.eligible(OrderSide::Buy, ranks)
            .map(OrderRecord::level)
            .sorted_by(|a, b| (b.price, b.quantity).cmp(&(a.price, a.quantity)))
            .take(k)
            .collect()
    }
}

impl FromIterator<OrderRecord> for OrderBook {
    fn from_iter<I: IntoIterator<Item = OrderRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
