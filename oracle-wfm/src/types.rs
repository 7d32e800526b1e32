//! Marketplace API response types
//!
//! These types mirror the marketplace's v1 order/statistics payloads and its
//! v1/v2 item catalogs, and are converted to oracle-core types for pricing.

use chrono::{DateTime, Utc};
use oracle_core::{MarketItem, OracleResult, OrderRecord, RankInfo, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Orders (GET /v1/items/{url_name}/orders)
// ============================================================================

/// Response from the orders endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    pub payload: OrdersPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<WfmOrder>,
}

/// A single order as listed on the marketplace
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmOrder {
    /// "sell" or "buy"
    pub order_type: String,

    pub visible: bool,

    /// Price in platinum
    pub platinum: u32,

    pub quantity: u32,

    /// Player who placed the order
    pub user: WfmUser,

    /// Only present for ranked items
    #[serde(default)]
    pub mod_rank: Option<u32>,
}

/// Order owner, trimmed to the fields the oracle reads
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmUser {
    #[serde(default)]
    pub reputation: i32,

    /// "offline", "online" or "ingame"
    pub status: String,
}

impl WfmOrder {
    /// Convert to an oracle-core OrderRecord
    pub fn to_order_record(&self) -> OracleResult<OrderRecord> {
        Ok(OrderRecord {
            side: self.order_type.parse()?,
            visible: self.visible,
            price: self.platinum,
            quantity: self.quantity,
            seller_reputation: self.user.reputation,
            presence: self.user.status.parse()?,
            rank: self.mod_rank.unwrap_or(0),
        })
    }
}

// ============================================================================
// Statistics (GET /v1/items/{url_name}/statistics)
// ============================================================================

/// Response from the statistics endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsResponse {
    pub payload: StatisticsPayload,
}

/// Statistics of closed trades.
///
/// The payload also carries `statistics_opened` (order listings per bucket),
/// which is not used for pricing and is skipped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsPayload {
    pub statistics_closed: StatisticsSet,
}

/// Buckets of one statistics kind at both resolutions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsSet {
    /// Hourly buckets for the last 48 hours
    #[serde(rename = "48hours", default)]
    pub hourly: Vec<WfmStatistic>,

    /// Daily buckets for the last 90 days, up to the last 00:00 UTC
    #[serde(rename = "90days", default)]
    pub daily: Vec<WfmStatistic>,
}

/// One statistics bucket, as drawn on the marketplace's price chart.
///
/// Chart-only fields (`wa_price`, `moving_avg`, `donch_top`, `donch_bot`)
/// are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmStatistic {
    /// Bucket start, e.g. "2024-07-29T07:00:00.000+00:00"
    pub datetime: DateTime<Utc>,

    #[serde(default)]
    pub volume: u32,

    /// Median trade price (blue line)
    #[serde(default)]
    pub median: Option<Decimal>,

    #[serde(default)]
    pub avg_price: Option<Decimal>,

    #[serde(default)]
    pub min_price: Option<Decimal>,

    #[serde(default)]
    pub max_price: Option<Decimal>,

    #[serde(default)]
    pub open_price: Option<Decimal>,

    #[serde(default)]
    pub closed_price: Option<Decimal>,

    #[serde(default)]
    pub mod_rank: Option<u32>,
}

impl WfmStatistic {
    /// Convert to an oracle-core TradeRecord
    pub fn to_trade_record(&self) -> TradeRecord {
        TradeRecord {
            timestamp: self.datetime,
            volume: self.volume,
            median_price: self.median,
            avg_price: self.avg_price,
            min_price: self.min_price,
            max_price: self.max_price,
            open_price: self.open_price,
            close_price: self.closed_price,
            rank: self.mod_rank.unwrap_or(0),
        }
    }
}

// ============================================================================
// Item Catalog (GET /v1/items and GET /v2/items)
// ============================================================================

/// Response from the v1 item catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsV1Response {
    pub payload: ItemsV1Payload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsV1Payload {
    #[serde(default)]
    pub items: Vec<WfmItemV1>,
}

/// A catalog entry from the v1 API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmItemV1 {
    pub id: String,
    pub url_name: String,
    #[serde(default)]
    pub thumb: Option<String>,
    pub item_name: String,
}

impl WfmItemV1 {
    /// Convert to an oracle-core MarketItem. v1 carries no rank information.
    pub fn to_market_item(&self) -> MarketItem {
        MarketItem {
            id: self.id.clone(),
            url_name: self.url_name.clone(),
            item_name: self.item_name.clone(),
            thumb: self.thumb.clone(),
            rank_info: RankInfo::Unknown,
        }
    }
}

/// Response from the v2 item catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsV2Response {
    #[serde(default)]
    pub data: Vec<WfmItemV2>,
}

/// A catalog entry from the v2 API
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WfmItemV2 {
    pub id: String,

    pub url_name: String,

    /// In-game path, e.g. "/Lotus/Powersuits/Ember/FireBlastAugmentCard"
    #[serde(default)]
    pub game_ref: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub i18n: WfmI18n,

    /// Only present for ranked items
    #[serde(default)]
    pub max_rank: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmI18n {
    pub en: WfmItemText,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WfmItemText {
    pub name: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

impl WfmItemV2 {
    /// Convert to an oracle-core MarketItem
    pub fn to_market_item(&self) -> MarketItem {
        let rank_info = match self.max_rank {
            Some(max_rank) => RankInfo::Tiered { max_rank },
            None => RankInfo::Untiered,
        };

        MarketItem {
            id: self.id.clone(),
            url_name: self.url_name.clone(),
            item_name: self.i18n.en.name.clone(),
            thumb: self.i18n.en.thumb.clone(),
            rank_info,
        }
    }
}
