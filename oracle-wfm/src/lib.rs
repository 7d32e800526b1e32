//! Marketplace feed integration for the item price oracle
//!
//! Deserializes the marketplace's orders, statistics and item catalog
//! payloads and converts them into oracle-core records.

pub mod feed;
pub mod types;

pub use feed::{parse_items, parse_orders, parse_statistics, ApiVersion, ClosedStatistics};
pub use types::*;
