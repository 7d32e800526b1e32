//! Price Estimator
//!
//! Produces one price per item through a fallback cascade. Each step is
//! tried in order and the first one with a positive answer wins:
//!
//! 1. volume-weighted mean of the last few hours of trades
//! 2. volume-weighted mean of the top share of the last 48 hours of trades
//! 3. the best in-session buy orders, returned as-is
//!
//! When all three come up empty there is no estimate.

use oracle_core::{HistoryQuery, OrderLevel, RankFilter, Resolution};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EstimatorConfig;
use crate::order_book::OrderBook;
use crate::trade_history::TradeHistory;

/// Estimated price and the cascade step that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PriceEstimate {
    /// Weighted mean of the most recent trades
    RecentTrades { price: Decimal },
    /// Weighted mean of the top share of the wider trade window
    WindowedTrades { price: Decimal },
    /// No usable trades; the highest in-session buy orders, highest first
    BuyOrders { orders: Vec<OrderLevel> },
}

impl PriceEstimate {
    /// Single headline figure: the traded price, or the best buy order
    pub fn headline_price(&self) -> Option<Decimal> {
        match self {
            PriceEstimate::RecentTrades { price } | PriceEstimate::WindowedTrades { price } => {
                Some(*price)
            }
            PriceEstimate::BuyOrders { orders } => {
                orders.first().map(|level| Decimal::from(level.price))
            }
        }
    }

    pub fn is_from_trades(&self) -> bool {
        !matches!(self, PriceEstimate::BuyOrders { .. })
    }
}

/// Estimates the price of one item from its book and history
#[derive(Debug, Clone)]
pub struct PriceEstimator<'a> {
    book: &'a OrderBook,
    history: &'a TradeHistory,
    config: EstimatorConfig,
}

impl<'a> PriceEstimator<'a> {
    pub fn new(book: &'a OrderBook, history: &'a TradeHistory) -> Self {
        Self::with_config(book, history, EstimatorConfig::default())
    }

    pub fn with_config(book: &'a OrderBook, history: &'a TradeHistory, config: EstimatorConfig) -> Self {
        Self {
            book,
            history,
            config,
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the price for the given ranks, measured from the history's
    /// reference time
    pub fn estimate(&self, ranks: RankFilter) -> Option<PriceEstimate> {
        self.estimate_with(&HistoryQuery::from(ranks))
    }

    /// Estimate the price with full query options.
    ///
    /// `None` means no price could be determined at all.
    pub fn estimate_with(&self, query: &HistoryQuery) -> Option<PriceEstimate> {
        let estimate = self
            .recent_trades(query)
            .map(|price| PriceEstimate::RecentTrades { price })
            .or_else(|| {
                self.windowed_trades(query)
                    .map(|price| PriceEstimate::WindowedTrades { price })
            })
            .or_else(|| self.buy_orders(query));

        match &estimate {
            Some(estimate) => debug!("Estimate for ranks {}: {:?}", query.ranks, estimate),
            None => debug!("No estimate for ranks {}: no trades and no buyers", query.ranks),
        }

        estimate
    }

    fn recent_trades(&self, query: &HistoryQuery) -> Option<Decimal> {
        self.history
            .weighted_mean(self.config.recent_hours, Resolution::Hourly, self.config.recent_ratio, query)
            .filter(|price| *price > Decimal::ZERO)
    }

    fn windowed_trades(&self, query: &HistoryQuery) -> Option<Decimal> {
        self.history
            .weighted_mean(self.config.window_hours, Resolution::Hourly, self.config.window_ratio, query)
            .filter(|price| *price > Decimal::ZERO)
    }

    fn buy_orders(&self, query: &HistoryQuery) -> Option<PriceEstimate> {
        let orders = self.book.top_k_buy(self.config.buy_depth, &query.ranks);
        if orders.is_empty() {
            return None;
        }
        Some(PriceEstimate::BuyOrders { orders })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use oracle_core::{OrderRecord, OrderSide, Presence, TradeRecord};
    use rust_decimal_macros::dec;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 29, 12, 0, 0).unwrap()
    }

    fn hours_ago(hours: i64, volume: u32, median: Decimal) -> TradeRecord {
        TradeRecord::new(as_of() - Duration::hours(hours), volume, median)
    }

    fn history(hourly: Vec<TradeRecord>) -> TradeHistory {
        TradeHistory::new(hourly, vec![]).with_reference_time(as_of())
    }

    fn buy(price: u32) -> OrderRecord {
        OrderRecord {
            side: OrderSide::Buy,
            visible: true,
            price,
            quantity: 1,
            seller_reputation: 0,
            presence: Presence::InSession,
            rank: 0,
        }
    }

    #[test]
    fn test_recent_trades_win() {
        let history = history(vec![
            hours_ago(1, 2, dec!(10)),
            hours_ago(2, 1, dec!(20)),
            hours_ago(20, 50, dec!(1000)),
        ]);
        let book = OrderBook::new(vec![buy(500)]);

        let estimate = PriceEstimator::new(&book, &history)
            .estimate(RankFilter::base())
            .unwrap();

        match estimate {
            PriceEstimate::RecentTrades { price } => assert_eq!(price.round_dp(2), dec!(13.33)),
            other => panic!("expected recent trades, got {:?}", other),
        }
    }

    #[test]
    fn test_falls_back_to_wider_window() {
        // 10 trades: top 30% = 3 values, all at 40
        let history = history(vec![
            hours_ago(5, 3, dec!(40)),
            hours_ago(30, 7, dec!(10)),
        ]);
        let book = OrderBook::new(vec![buy(500)]);

        let estimate = PriceEstimator::new(&book, &history).estimate(RankFilter::base());
        assert_eq!(estimate, Some(PriceEstimate::WindowedTrades { price: dec!(40) }));
    }

    #[test]
    fn test_zero_priced_trades_are_skipped() {
        let history = history(vec![hours_ago(1, 5, dec!(0))]);
        let book = OrderBook::new(vec![buy(7)]);

        let estimate = PriceEstimator::new(&book, &history).estimate(RankFilter::base());
        assert_eq!(
            estimate,
            Some(PriceEstimate::BuyOrders {
                orders: vec![OrderLevel::new(7, 1)]
            })
        );
    }

    #[test]
    fn test_falls_back_to_buy_orders_unmodified() {
        let history = history(vec![]);
        let book = OrderBook::new(vec![buy(45), buy(50), buy(40)]);

        let estimate = PriceEstimator::new(&book, &history)
            .estimate(RankFilter::base())
            .unwrap();

        assert_eq!(
            estimate,
            PriceEstimate::BuyOrders {
                orders: vec![OrderLevel::new(50, 1), OrderLevel::new(45, 1), OrderLevel::new(40, 1)]
            }
        );
        assert_eq!(estimate.headline_price(), Some(dec!(50)));
        assert!(!estimate.is_from_trades());
    }

    #[test]
    fn test_no_estimate_when_everything_is_empty() {
        let history = history(vec![]);
        let book = OrderBook::default();

        assert_eq!(PriceEstimator::new(&book, &history).estimate(RankFilter::base()), None);
    }

    #[test]
    fn test_rank_filter_applies_to_every_step() {
        let history = history(vec![hours_ago(1, 3, dec!(80)).with_rank(10)]);
        let mut ranked_buy = buy(60);
        ranked_buy.rank = 10;
        let book = OrderBook::new(vec![ranked_buy]);
        let estimator = PriceEstimator::new(&book, &history);

        assert_eq!(
            estimator.estimate(RankFilter::exact(10)),
            Some(PriceEstimate::RecentTrades { price: dec!(80) })
        );
        assert_eq!(estimator.estimate(RankFilter::base()), None);
    }

    #[test]
    fn test_custom_config() {
        let history = history(vec![hours_ago(5, 3, dec!(40))]);
        let book = OrderBook::default();
        let config = EstimatorConfig {
            recent_hours: 6,
            ..Default::default()
        };

        let estimate = PriceEstimator::with_config(&book, &history, config).estimate(RankFilter::base());
        assert_eq!(estimate, Some(PriceEstimate::RecentTrades { price: dec!(40) }));
    }

    #[test]
    fn test_unvalidated_huge_window_still_estimates() {
        let history = history(vec![hours_ago(40, 3, dec!(40))]);
        let book = OrderBook::default();
        let config = EstimatorConfig {
            recent_hours: u32::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let estimate = PriceEstimator::with_config(&book, &history, config).estimate(RankFilter::base());
        assert_eq!(estimate, Some(PriceEstimate::RecentTrades { price: dec!(40) }));
    }

    #[test]
    fn test_estimate_serializes_with_source_tag() {
        let estimate = PriceEstimate::WindowedTrades { price: dec!(12.5) };
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["source"], "windowed_trades");
    }
}
