mod commands;
mod output;

use anyhow::Result;
use aurum_lib::FeedConfig;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "aurum")]
#[command(about = "Live gold spot price with a simulated fallback feed")]
struct Cli {
    /// Output format: table, json, or csv
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current quote once
    Quote(commands::quote::QuoteArgs),
    /// Print a simulated year of daily closes
    History(commands::history::HistoryArgs),
    /// Poll the quote on an interval until stopped
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aurum=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);
    let config = FeedConfig::from_env();

    if config.access_token.is_none() {
        tracing::info!("GOLDAPI_ACCESS_TOKEN is not set; quotes will be simulated");
    }

    match &cli.command {
        Commands::Quote(args) => commands::quote::run(args, &config, &format).await?,
        Commands::History(args) => commands::history::run(args, &config, &format).await?,
        Commands::Watch(args) => commands::watch::run(args, &config, &format).await?,
    }

    Ok(())
}
