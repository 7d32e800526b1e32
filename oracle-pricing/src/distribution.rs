//! Price distribution statistics
//!
//! Helpers shared by the history queries. "Top fraction" selections always
//! truncate (`floor(len * ratio)`) and fall back to the whole population when
//! that count is zero, so small samples never yield an undefined result.
//!
//! Volume-weighted distributions are kept as (price, weight) pairs and walked
//! by cumulative weight rather than expanded into one value per trade.

use itertools::Itertools;
use oracle_core::TradeRecord;
use rust_decimal::Decimal;

/// Statistic applied to a volume-weighted price distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    pub fn apply(&self, prices: &[WeightedPrice]) -> Option<Decimal> {
        match self {
            Statistic::Mean => weighted_mean(prices),
            Statistic::Median => weighted_median(prices),
        }
    }
}

/// A bucket median counted once per trade in the bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedPrice {
    pub price: Decimal,
    pub weight: u64,
}

impl WeightedPrice {
    pub fn new(price: Decimal, weight: u64) -> Self {
        Self { price, weight }
    }
}

/// Number of values selected by `ratio`: `floor(len * ratio)`, capped at `len`.
/// Non-finite or non-positive ratios select nothing.
pub fn top_fraction_count(len: u64, ratio: f64) -> u64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    ((len as f64 * ratio).floor() as u64).min(len)
}

pub fn top_fraction_len(len: usize, ratio: f64) -> usize {
    top_fraction_count(len as u64, ratio) as usize
}

/// Leading `ratio` fraction of a descending slice, or the whole slice when
/// that fraction would be empty
pub fn top_fraction(sorted_desc: &[Decimal], ratio: f64) -> &[Decimal] {
    match top_fraction_len(sorted_desc.len(), ratio) {
        0 => sorted_desc,
        count => &sorted_desc[..count],
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Per-bucket median prices, highest first. Buckets without a median are skipped.
pub fn medians_desc<'a>(records: impl IntoIterator<Item = &'a TradeRecord>) -> Vec<Decimal> {
    records
        .into_iter()
        .filter_map(|record| record.median_price)
        .sorted_by(|a, b| b.cmp(a))
        .collect()
}

/// Each bucket's median weighted by its volume, highest price first.
/// Buckets with zero volume or without a median contribute nothing.
pub fn weighted_desc<'a>(records: impl IntoIterator<Item = &'a TradeRecord>) -> Vec<WeightedPrice> {
    records
        .into_iter()
        .filter(|record| record.volume > 0)
        .filter_map(|record| {
            record
                .median_price
                .map(|price| WeightedPrice::new(price, u64::from(record.volume)))
        })
        .sorted_by(|a, b| b.price.cmp(&a.price))
        .collect()
}

pub fn total_weight(prices: &[WeightedPrice]) -> u64 {
    prices.iter().map(|p| p.weight).sum()
}

/// Leading `ratio` share of the individual trades in a descending weighted
/// list, or all of them when that share would be empty. The last bucket
/// taken is cut down to the remaining count.
pub fn top_weighted_fraction(sorted_desc: &[WeightedPrice], ratio: f64) -> Vec<WeightedPrice> {
    let total = total_weight(sorted_desc);
    let mut remaining = match top_fraction_count(total, ratio) {
        0 => total,
        count => count,
    };

    let mut selected = Vec::new();
    for entry in sorted_desc {
        if remaining == 0 {
            break;
        }
        let weight = entry.weight.min(remaining);
        selected.push(WeightedPrice::new(entry.price, weight));
        remaining -= weight;
    }
    selected
}

/// Mean over every trade, `None` when there are none or the sum overflows
pub fn weighted_mean(prices: &[WeightedPrice]) -> Option<Decimal> {
    let total = total_weight(prices);
    if total == 0 {
        return None;
    }

    let sum = prices.iter().try_fold(Decimal::ZERO, |sum, p| {
        p.price.checked_mul(Decimal::from(p.weight)).and_then(|v| sum.checked_add(v))
    })?;
    sum.checked_div(Decimal::from(total))
}

/// Median over every trade (mean of the middle pair for even counts),
/// `None` when there are none. Accepts either sort direction.
pub fn weighted_median(sorted: &[WeightedPrice]) -> Option<Decimal> {
    let total = total_weight(sorted);
    if total == 0 {
        return None;
    }

    let mid = total / 2;
    if total % 2 == 1 {
        nth_trade(sorted, mid)
    } else {
        let low = nth_trade(sorted, mid - 1)?;
        let high = nth_trade(sorted, mid)?;
        Some((low + high) / Decimal::from(2))
    }
}

/// Price of the `index`-th individual trade, counting through the weights
fn nth_trade(sorted: &[WeightedPrice], index: u64) -> Option<Decimal> {
    let mut seen = 0u64;
    for entry in sorted {
        seen += entry.weight;
        if index < seen {
            return Some(entry.price);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bucket(volume: u32, median: Decimal) -> TradeRecord {
        TradeRecord::new(Utc.with_ymd_and_hms(2024, 7, 29, 7, 0, 0).unwrap(), volume, median)
    }

    #[test]
    fn test_top_fraction_len_truncates() {
        assert_eq!(top_fraction_len(10, 0.3), 3);
        assert_eq!(top_fraction_len(3, 0.3), 0);
        assert_eq!(top_fraction_len(4, 0.3), 1);
        assert_eq!(top_fraction_len(7, 1.0), 7);
        assert_eq!(top_fraction_len(7, 2.5), 7);
        assert_eq!(top_fraction_len(7, -1.0), 0);
        assert_eq!(top_fraction_len(7, f64::NAN), 0);
        assert_eq!(top_fraction_len(0, 0.5), 0);
    }

    #[test]
    fn test_top_fraction_falls_back_to_whole_population() {
        let values = [dec!(30), dec!(20), dec!(10)];
        assert_eq!(top_fraction(&values, 0.3), &values[..]);
        assert_eq!(top_fraction(&values, 0.5), &values[..1]);
        assert!(top_fraction(&[], 0.5).is_empty());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[dec!(15), dec!(10), dec!(5)]), Some(dec!(10)));
    }

    #[test]
    fn test_weighted_statistics() {
        let records = vec![bucket(2, dec!(10)), bucket(1, dec!(20)), bucket(0, dec!(99))];
        let prices = weighted_desc(&records);
        assert_eq!(
            prices,
            vec![WeightedPrice::new(dec!(20), 1), WeightedPrice::new(dec!(10), 2)]
        );
        assert_eq!(total_weight(&prices), 3);

        let weighted_mean = Statistic::Mean.apply(&prices).unwrap();
        assert_eq!(weighted_mean.round_dp(4), dec!(13.3333));
        assert_eq!(Statistic::Median.apply(&prices), Some(dec!(10)));

        assert_eq!(Statistic::Mean.apply(&[]), None);
        assert_eq!(Statistic::Median.apply(&[]), None);
    }

    #[test]
    fn test_weighted_median_even_count() {
        // [40, 30, 30, 10] -> middle pair 30, 30; [40, 10] -> 25
        let prices = vec![
            WeightedPrice::new(dec!(40), 1),
            WeightedPrice::new(dec!(30), 2),
            WeightedPrice::new(dec!(10), 1),
        ];
        assert_eq!(weighted_median(&prices), Some(dec!(30)));

        let pair = vec![WeightedPrice::new(dec!(40), 1), WeightedPrice::new(dec!(10), 1)];
        assert_eq!(weighted_median(&pair), Some(dec!(25)));
    }

    #[test]
    fn test_top_weighted_fraction_cuts_last_bucket() {
        // 10 trades, top 30% = 3: two at 50 and one of the 20s
        let prices = vec![WeightedPrice::new(dec!(50), 2), WeightedPrice::new(dec!(20), 8)];
        let top = top_weighted_fraction(&prices, 0.3);
        assert_eq!(top, vec![WeightedPrice::new(dec!(50), 2), WeightedPrice::new(dec!(20), 1)]);
        assert_eq!(weighted_mean(&top), Some(dec!(40)));

        // floor(2 * 0.3) = 0 falls back to everything
        let few = vec![WeightedPrice::new(dec!(50), 1), WeightedPrice::new(dec!(20), 1)];
        assert_eq!(top_weighted_fraction(&few, 0.3), few);
    }

    #[test]
    fn test_huge_volume_is_not_expanded() {
        let records = vec![bucket(u32::MAX, dec!(12)), bucket(u32::MAX, dec!(8))];
        let prices = weighted_desc(&records);

        assert_eq!(total_weight(&prices), 2 * u64::from(u32::MAX));
        assert_eq!(weighted_mean(&prices), Some(dec!(10)));
        assert_eq!(weighted_median(&prices), Some(dec!(10)));
        assert_eq!(weighted_mean(&top_weighted_fraction(&prices, 0.5)), Some(dec!(12)));
    }

    #[test]
    fn test_buckets_without_median_are_skipped() {
        let mut missing = bucket(5, dec!(0));
        missing.median_price = None;
        let records = vec![missing, bucket(1, dec!(7))];

        assert_eq!(weighted_desc(&records), vec![WeightedPrice::new(dec!(7), 1)]);
        assert_eq!(medians_desc(&records), vec![dec!(7)]);
    }
}
