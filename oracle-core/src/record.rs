//! Trade and order records for a single item

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::rank::RankFilter;

// ============================================================================
// Order Types
// ============================================================================

/// Which side of the book an order sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Someone is selling the item
    Sell,
    /// Someone wants to buy the item
    Buy,
}

impl std::str::FromStr for OrderSide {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sell" => Ok(OrderSide::Sell),
            "buy" => Ok(OrderSide::Buy),
            _ => Err(OracleError::invalid_field("order side", s)),
        }
    }
}

/// Presence of the player who placed an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Offline,
    Online,
    /// Logged into the game and able to trade right now
    #[serde(alias = "ingame")]
    InSession,
}

impl std::str::FromStr for Presence {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline" => Ok(Presence::Offline),
            "online" => Ok(Presence::Online),
            "insession" | "ingame" => Ok(Presence::InSession),
            _ => Err(OracleError::invalid_field("presence", s)),
        }
    }
}

/// A live order on the marketplace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub side: OrderSide,
    /// Whether the order is currently listed
    pub visible: bool,
    pub price: u32,
    pub quantity: u32,
    pub seller_reputation: i32,
    pub presence: Presence,
    /// 0 for untiered items
    #[serde(default)]
    pub rank: u32,
}

impl OrderRecord {
    pub fn is_sell(&self) -> bool {
        self.side == OrderSide::Sell
    }

    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    pub fn is_in_session(&self) -> bool {
        self.presence == Presence::InSession
    }

    /// Whether the order can be traded against right now on the given side
    pub fn is_eligible(&self, side: OrderSide, ranks: &RankFilter) -> bool {
        self.side == side && self.visible && self.is_in_session() && ranks.contains(self.rank)
    }

    pub fn level(&self) -> OrderLevel {
        OrderLevel::new(self.price, self.quantity)
    }
}

/// A (price, quantity) pair taken from an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: u32,
    pub quantity: u32,
}

impl OrderLevel {
    pub fn new(price: u32, quantity: u32) -> Self {
        Self { price, quantity }
    }
}

// ============================================================================
// Trade Statistic Types
// ============================================================================

/// Bucket resolution of the trade statistics feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// One bucket per hour, covering roughly the last 48 hours
    Hourly,
    /// One bucket per UTC day, covering roughly the last 90 days.
    /// The newest bucket may lag real time by up to a day.
    Daily,
}

impl Resolution {
    /// Duration of `count` buckets at this resolution
    pub fn span(&self, count: u32) -> Duration {
        match self {
            Resolution::Hourly => Duration::hours(i64::from(count)),
            Resolution::Daily => Duration::days(i64::from(count)),
        }
    }

    /// How many buckets the feed covers at most
    pub fn coverage(&self) -> u32 {
        match self {
            Resolution::Hourly => 48,
            Resolution::Daily => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hourly => "hours",
            Resolution::Daily => "days",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate statistics of closed trades in one time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Start of the bucket
    pub timestamp: DateTime<Utc>,
    /// Number of completed trades
    pub volume: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_price: Option<Decimal>,
    /// 0 for untiered items
    #[serde(default)]
    pub rank: u32,
}

impl TradeRecord {
    /// Create a bucket carrying only a volume and a median price
    pub fn new(timestamp: DateTime<Utc>, volume: u32, median_price: Decimal) -> Self {
        Self {
            timestamp,
            volume,
            median_price: Some(median_price),
            avg_price: None,
            min_price: None,
            max_price: None,
            open_price: None,
            close_price: None,
            rank: 0,
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    /// Whether any trade closed in this bucket
    pub fn has_trades(&self) -> bool {
        self.volume > 0
    }
}
