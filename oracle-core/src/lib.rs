//! Core types for the item price oracle
//!
//! This crate defines the shared data structures used across the oracle:
//! order and trade-statistic records, rank filters, query options and
//! catalog items.

pub mod error;
pub mod item;
pub mod query;
pub mod rank;
pub mod record;

pub use error::{OracleError, OracleResult};
pub use item::{name_map, MarketItem, RankInfo};
pub use query::HistoryQuery;
pub use rank::RankFilter;
pub use record::{OrderLevel, OrderRecord, OrderSide, Presence, Resolution, TradeRecord};
