//! Payload parsing
//!
//! Turns raw JSON bodies into oracle-core records. Fetching the bodies is
//! left to the caller.

use oracle_core::{MarketItem, OracleError, OracleResult, OrderRecord, TradeRecord};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{ItemsV1Response, ItemsV2Response, OrdersResponse, StatisticsResponse};

/// Catalog API version a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

/// Closed-trade buckets at both resolutions
#[derive(Debug, Clone, Default)]
pub struct ClosedStatistics {
    pub hourly: Vec<TradeRecord>,
    pub daily: Vec<TradeRecord>,
}

fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> OracleResult<T> {
    serde_json::from_str(json).map_err(|e| OracleError::parse(format!("{} payload: {}", what, e)))
}

/// Parse an orders payload into order records.
///
/// Orders with an unrecognised side or status are skipped; the rest of the
/// book is still usable.
pub fn parse_orders(json: &str) -> OracleResult<Vec<OrderRecord>> {
    let response: OrdersResponse = from_json(json, "orders")?;
    let listed = response.payload.orders.len();

    let orders: Vec<OrderRecord> = response
        .payload
        .orders
        .iter()
        .filter_map(|order| match order.to_order_record() {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping order: {}", e);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} orders", orders.len(), listed);
    Ok(orders)
}

/// Parse a statistics payload into closed-trade buckets
pub fn parse_statistics(json: &str) -> OracleResult<ClosedStatistics> {
    let response: StatisticsResponse = from_json(json, "statistics")?;
    let closed = response.payload.statistics_closed;

    let statistics = ClosedStatistics {
        hourly: closed.hourly.iter().map(|s| s.to_trade_record()).collect(),
        daily: closed.daily.iter().map(|s| s.to_trade_record()).collect(),
    };

    debug!(
        "Parsed {} hourly and {} daily buckets",
        statistics.hourly.len(),
        statistics.daily.len()
    );
    Ok(statistics)
}

/// Parse an item catalog payload
pub fn parse_items(json: &str, version: ApiVersion) -> OracleResult<Vec<MarketItem>> {
    let items: Vec<MarketItem> = match version {
        ApiVersion::V1 => from_json::<ItemsV1Response>(json, "v1 items")?
            .payload
            .items
            .iter()
            .map(|item| item.to_market_item())
            .collect(),
        ApiVersion::V2 => from_json::<ItemsV2Response>(json, "v2 items")?
            .data
            .iter()
            .map(|item| item.to_market_item())
            .collect(),
    };

    debug!("Parsed {} catalog items ({:?})", items.len(), version);
    Ok(items)
}
