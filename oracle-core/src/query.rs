//! Query options shared by the history and estimator lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rank::RankFilter;

/// Options for a time-windowed history query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Reference time the window is measured back from.
    /// Falls back to the history's own reference time, then to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,

    /// Ranks to include
    #[serde(default)]
    pub ranks: RankFilter,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn ranks(mut self, ranks: RankFilter) -> Self {
        self.ranks = ranks;
        self
    }
}

impl From<RankFilter> for HistoryQuery {
    fn from(ranks: RankFilter) -> Self {
        Self::new().ranks(ranks)
    }
}
