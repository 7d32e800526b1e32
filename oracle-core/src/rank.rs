//! Rank filters for tiered items
//!
//! Tiered items (mods, arcanes) trade at different prices per rank, so every
//! order and statistic bucket carries a rank. Untiered items always use rank 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::OracleError;

/// The set of ranks a query should consider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankFilter {
    /// An explicit set of ranks
    Ranks(BTreeSet<u32>),
    /// Every rank between `min` and `max` (inclusive)
    Range { min: u32, max: u32 },
}

impl RankFilter {
    /// Untiered records only (rank 0)
    pub fn base() -> Self {
        Self::exact(0)
    }

    /// A single rank
    pub fn exact(rank: u32) -> Self {
        RankFilter::Ranks(BTreeSet::from([rank]))
    }

    /// Any of the given ranks
    pub fn ranks(ranks: impl IntoIterator<Item = u32>) -> Self {
        RankFilter::Ranks(ranks.into_iter().collect())
    }

    /// All ranks in an inclusive range
    pub fn between(range: RangeInclusive<u32>) -> Self {
        RankFilter::Range {
            min: *range.start(),
            max: *range.end(),
        }
    }

    /// Every rank, tiered or not
    pub fn any() -> Self {
        Self::between(0..=u32::MAX)
    }

    /// Ranked records only, excluding rank 0
    pub fn tiered() -> Self {
        Self::between(1..=u32::MAX)
    }

    pub fn contains(&self, rank: u32) -> bool {
        match self {
            RankFilter::Ranks(ranks) => ranks.contains(&rank),
            RankFilter::Range { min, max } => (*min..=*max).contains(&rank),
        }
    }
}

impl Default for RankFilter {
    fn default() -> Self {
        RankFilter::base()
    }
}

impl fmt::Display for RankFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankFilter::Ranks(ranks) => {
                let joined: Vec<String> = ranks.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", joined.join(","))
            }
            RankFilter::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

impl std::str::FromStr for RankFilter {
    type Err = OracleError;

    /// Accepts `all`/`any`, `tiered`, a range `a-b`, or a list `a,b,c`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "all" | "any" => return Ok(RankFilter::any()),
            "tiered" => return Ok(RankFilter::tiered()),
            _ => {}
        }

        let parse_rank = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| OracleError::invalid_field("rank", format!("{:?}: {}", part, e)))
        };

        if let Some((min, max)) = s.split_once('-') {
            let (min, max) = (parse_rank(min)?, parse_rank(max)?);
            if min > max {
                return Err(OracleError::invalid_field(
                    "rank",
                    format!("range {}-{} is empty", min, max),
                ));
            }
            return Ok(RankFilter::between(min..=max));
        }

        let ranks = s.split(',').map(parse_rank).collect::<Result<BTreeSet<_>, _>>()?;
        Ok(RankFilter::Ranks(ranks))
    }
}
