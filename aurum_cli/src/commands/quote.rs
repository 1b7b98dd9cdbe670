use anyhow::Result;
use aurum_lib::{FeedConfig, QuoteFetcher};
use clap::Args;

use crate::output::{print_dashboard, print_grams_table, print_json, print_stats_csv, OutputFormat};

#[derive(Args)]
pub struct QuoteArgs {
    /// Also list per-gram prices for every purity
    #[arg(long)]
    pub grams: bool,

    /// Seed the fallback generator for reproducible synthetic quotes
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: &QuoteArgs, config: &FeedConfig, format: &OutputFormat) -> Result<()> {
    let mut fetcher = QuoteFetcher::new(config)?;
    if let Some(seed) = args.seed {
        fetcher = fetcher.with_seed(seed);
    }

    let fetched = fetcher.fetch().await;
    match format {
        OutputFormat::Table => {
            print_dashboard(&fetched);
            if args.grams {
                print_grams_table(&fetched.quote);
            }
        }
        OutputFormat::Json => print_json(&fetched),
        OutputFormat::Csv => print_stats_csv(&fetched.quote, true)?,
    }
    Ok(())
}
