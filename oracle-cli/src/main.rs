//! Item Price Oracle CLI
//!
//! Estimates an item's price from saved orders and statistics payloads and
//! prints the result as JSON.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use oracle_core::{HistoryQuery, RankFilter};
use oracle_pricing::{EstimatorConfig, OrderBook, PriceEstimate, PriceEstimator, TradeHistory};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "price-oracle", about = "Estimate an item's fair price from marketplace payloads")]
struct Args {
    /// Orders payload (JSON body of the item's orders endpoint)
    #[arg(long, env = "ORACLE_ORDERS_PATH")]
    orders: PathBuf,

    /// Statistics payload (JSON body of the item's statistics endpoint)
    #[arg(long, env = "ORACLE_STATISTICS_PATH")]
    statistics: PathBuf,

    /// Item name echoed in the output
    #[arg(long, default_value = "item")]
    item: String,

    /// Ranks to price: `0`, `all`, `tiered`, a range `a-b` or a list `a,b`
    #[arg(long, default_value = "0")]
    ranks: RankFilter,

    /// Measure windows back from this time instead of now (RFC 3339)
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    item: &'a str,
    ranks: String,
    /// `null` when no price could be determined
    estimate: Option<PriceEstimate>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging on stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,oracle_pricing=debug")),
        )
        .init();

    let args = Args::parse();
    let config = EstimatorConfig::from_env().context("invalid estimator configuration")?;

    let orders_json = fs::read_to_string(&args.orders)
        .with_context(|| format!("failed to read {}", args.orders.display()))?;
    let statistics_json = fs::read_to_string(&args.statistics)
        .with_context(|| format!("failed to read {}", args.statistics.display()))?;

    let book = OrderBook::new(oracle_wfm::parse_orders(&orders_json)?);
    let statistics = oracle_wfm::parse_statistics(&statistics_json)?;
    let history = TradeHistory::new(statistics.hourly, statistics.daily);

    info!(
        "Loaded {} orders for {:?} ({} ranks)",
        book.orders().len(),
        args.item,
        args.ranks
    );

    let mut query = HistoryQuery::new().ranks(args.ranks.clone());
    if let Some(as_of) = args.as_of {
        query = query.as_of(as_of);
    }

    let estimate = PriceEstimator::with_config(&book, &history, config).estimate_with(&query);
    if estimate.is_none() {
        warn!("No price determinable for {:?}", args.item);
    }

    let report = Report {
        item: &args.item,
        ranks: args.ranks.to_string(),
        estimate,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_item_ranks_and_estimate() {
        let report = Report {
            item: "Healing Flame",
            ranks: "3".parse::<RankFilter>().unwrap().to_string(),
            estimate: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["item"], "Healing Flame");
        assert_eq!(json["ranks"], "3");
        assert!(json["estimate"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
