use anyhow::{bail, Result};
use aurum_lib::{FeedConfig, QuoteFetcher};
use clap::Args;

use crate::output::{print_history_csv, print_history_table, print_json, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Price the series should end on
    #[arg(long, conflicts_with = "anchor")]
    pub target: Option<f64>,

    /// End the series on the current quote (live, or synthetic on failure)
    #[arg(long)]
    pub anchor: bool,

    /// Seed the generator for a reproducible series
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only print the most recent N days
    #[arg(long)]
    pub last: Option<usize>,
}

pub async fn run(args: &HistoryArgs, config: &FeedConfig, format: &OutputFormat) -> Result<()> {
    if let Some(target) = args.target {
        if !target.is_finite() || target <= 0.0 {
            bail!("--target must be a positive price, got {}", target);
        }
    }

    let mut fetcher = QuoteFetcher::new(config)?;
    if let Some(seed) = args.seed {
        fetcher = fetcher.with_seed(seed);
    }

    let target = if args.anchor {
        Some(fetcher.fetch_quote().await.price)
    } else {
        args.target
    };

    let points = fetcher.fetch_history(target).await;
    let shown = match args.last {
        Some(n) => &points[points.len().saturating_sub(n)..],
        None => &points[..],
    };

    match format {
        OutputFormat::Table => print_history_table(shown),
        OutputFormat::Json => print_json(&shown),
        OutputFormat::Csv => print_history_csv(shown)?,
    }
    Ok(())
}
