use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use aurum_lib::{FeedConfig, FetchState, QuoteFetcher, QuotePoller};
use clap::Args;

use crate::output::{print_dashboard, print_json_line, print_stats_csv, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between polls (overrides AURUM_POLL_INTERVAL_SECS)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Stop after this many quotes
    #[arg(long)]
    pub count: Option<usize>,
}

/// Polls until Ctrl-C or `--count` quotes have been shown.
pub async fn run(args: &WatchArgs, config: &FeedConfig, format: &OutputFormat) -> Result<()> {
    if args.count == Some(0) {
        bail!("--count must be at least 1");
    }

    let mut config = config.clone();
    if let Some(secs) = args.interval {
        config.poll_interval = Duration::from_secs(secs);
    }

    let fetcher = QuoteFetcher::new(&config)?;
    let handle = QuotePoller::spawn(Arc::new(fetcher), config.poll_interval);
    let mut rx = handle.subscribe();
    let mut shown = 0usize;

    tracing::info!(
        "Watching {}/{} every {}s (Ctrl-C to stop)",
        config.metal,
        config.currency,
        config.poll_interval.as_secs()
    );

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                break;
            }
        }

        let state = rx.borrow_and_update().clone();
        match state {
            FetchState::Loading => tracing::debug!("Syncing data"),
            FetchState::Data(fetched) => {
                match format {
                    OutputFormat::Table => {
                        print_dashboard(&fetched);
                        println!();
                    }
                    OutputFormat::Json => print_json_line(&fetched),
                    OutputFormat::Csv => print_stats_csv(&fetched.quote, shown == 0)?,
                }
                shown += 1;
                if args.count.is_some_and(|n| shown >= n) {
                    break;
                }
            }
            FetchState::Error(msg) => eprintln!("{}", msg),
        }
    }

    handle.shutdown().await;
    Ok(())
}
