//! Tradable items and their catalog metadata

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::rank::RankFilter;

/// Base URL of the public marketplace site
pub const MARKET_SITE_BASE: &str = "https://warframe.market";

/// What the catalog says about an item's ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum RankInfo {
    /// The catalog version did not report rank information
    Unknown,
    /// The item has no ranks
    Untiered,
    /// The item can be ranked up to `max_rank`
    Tiered { max_rank: u32 },
}

/// An item listed in the marketplace catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: String,
    /// URL slug, also the key used by the per-item endpoints
    pub url_name: String,
    /// Display name, the join key between feeds and estimates
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
    pub rank_info: RankInfo,
}

impl MarketItem {
    /// `None` when the catalog did not say
    pub fn is_tiered(&self) -> Option<bool> {
        match self.rank_info {
            RankInfo::Unknown => None,
            RankInfo::Untiered => Some(false),
            RankInfo::Tiered { .. } => Some(true),
        }
    }

    /// Highest rank, 0 for untiered or unknown items
    pub fn max_rank(&self) -> u32 {
        match self.rank_info {
            RankInfo::Tiered { max_rank } => max_rank,
            _ => 0,
        }
    }

    /// Filter selecting fully ranked copies of this item
    pub fn max_rank_filter(&self) -> RankFilter {
        RankFilter::exact(self.max_rank())
    }

    /// Link to the item's page on the marketplace site
    pub fn market_url(&self) -> String {
        format!("{}/items/{}", MARKET_SITE_BASE, self.url_name)
    }
}

impl fmt::Display for MarketItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<MarketItem \"{}\">", self.item_name)
    }
}

/// Index items by display name
pub fn name_map(items: impl IntoIterator<Item = MarketItem>) -> HashMap<String, MarketItem> {
    items
        .into_iter()
        .map(|item| (item.item_name.clone(), item))
        .collect()
}
