//! Trade History
//!
//! Time-bucketed closed-trade statistics for a single item at two
//! resolutions, with windowed lookups and the price distributions derived
//! from them.
//!
//! Buckets arrive in no particular order and may have gaps, so every query
//! scans the full bucket set for its resolution.

use chrono::{DateTime, Utc};
use oracle_core::{HistoryQuery, Resolution, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distribution::{self, Statistic};

/// Closed-trade statistics for one item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeHistory {
    hourly: Vec<TradeRecord>,
    daily: Vec<TradeRecord>,
    /// Used as "now" when a query does not set `as_of`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_time: Option<DateTime<Utc>>,
}

impl TradeHistory {
    pub fn new(hourly: Vec<TradeRecord>, daily: Vec<TradeRecord>) -> Self {
        Self {
            hourly,
            daily,
            reference_time: None,
        }
    }

    /// Pin the reference time, e.g. to replay a saved snapshot
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.reference_time
    }

    /// All buckets at a resolution, unfiltered and unordered
    pub fn buckets(&self, resolution: Resolution) -> &[TradeRecord] {
        match resolution {
            Resolution::Hourly => &self.hourly,
            Resolution::Daily => &self.daily,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty() && self.daily.is_empty()
    }

    fn as_of(&self, query: &HistoryQuery) -> DateTime<Utc> {
        query
            .as_of
            .or(self.reference_time)
            .unwrap_or_else(Utc::now)
    }

    /// Buckets newer than `as_of - window` whose rank passes the query's filter.
    ///
    /// A window reaching past the earliest representable time covers every
    /// bucket. An empty result is normal for thinly traded items.
    pub fn records_within(
        &self,
        window: u32,
        resolution: Resolution,
        query: &HistoryQuery,
    ) -> Vec<&TradeRecord> {
        if window > resolution.coverage() {
            debug!(
                "Window of {} {} exceeds feed coverage of {}",
                window,
                resolution,
                resolution.coverage()
            );
        }

        let cutoff = self
            .as_of(query)
            .checked_sub_signed(resolution.span(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        self.buckets(resolution)
            .iter()
            .filter(|record| record.timestamp > cutoff && query.ranks.contains(record.rank))
            .collect()
    }

    /// Total trades in the window, 0 when nothing traded
    pub fn volume_within(&self, window: u32, resolution: Resolution, query: &HistoryQuery) -> u64 {
        self.records_within(window, resolution, query)
            .iter()
            .map(|record| u64::from(record.volume))
            .sum()
    }

    /// Mean of the top `ratio` share of per-bucket medians, ignoring volume.
    ///
    /// Falls back to the mean of all medians when the share rounds down to
    /// nothing. `None` when no bucket in the window has a median.
    pub fn median_of_medians(
        &self,
        window: u32,
        resolution: Resolution,
        ratio: f64,
        query: &HistoryQuery,
    ) -> Option<Decimal> {
        let medians = distribution::medians_desc(self.records_within(window, resolution, query));
        distribution::mean(distribution::top_fraction(&medians, ratio))
    }

    /// Apply `statistic` to the top `ratio` share of the volume-weighted
    /// price distribution.
    ///
    /// Each bucket contributes its median once per trade. Falls back to the
    /// whole distribution when the share rounds down to nothing. `None` when
    /// nothing traded in the window.
    pub fn weighted_price(
        &self,
        window: u32,
        resolution: Resolution,
        ratio: f64,
        statistic: Statistic,
        query: &HistoryQuery,
    ) -> Option<Decimal> {
        let prices = distribution::weighted_desc(self.records_within(window, resolution, query));
        statistic.apply(&distribution::top_weighted_fraction(&prices, ratio))
    }

    pub fn weighted_mean(
        &self,
        window: u32,
        resolution: Resolution,
        ratio: f64,
        query: &HistoryQuery,
    ) -> Option<Decimal> {
        self.weighted_price(window, resolution, ratio, Statistic::Mean, query)
    }

    pub fn weighted_median(
        &self,
        window: u32,
        resolution: Resolution,
        ratio: f64,
        query: &HistoryQuery,
    ) -> Option<Decimal> {
        self.weighted_price(window, resolution, ratio, Statistic::Median, query)
    }
}
