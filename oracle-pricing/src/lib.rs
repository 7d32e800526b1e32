//! Price estimation for the item price oracle
//!
//! This crate turns an item's order book and bucketed trade history into a
//! single price estimate, and batches estimates across many items.

pub mod board;
pub mod config;
pub mod distribution;
pub mod estimator;
pub mod order_book;
pub mod trade_history;

pub use board::{ItemSnapshot, PriceBoard};
pub use config::EstimatorConfig;
pub use distribution::{Statistic, WeightedPrice};
pub use estimator::{PriceEstimate, PriceEstimator};
pub use order_book::OrderBook;
pub use trade_history::TradeHistory;
