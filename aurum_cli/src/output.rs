use anyhow::Result;
use aurum_lib::types::{ChangeDirection, HistoricalPoint, Karat, Quote};
use aurum_lib::{FetchedQuote, QuoteOrigin};
use chrono::{Local, TimeZone};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct StatRow {
    #[tabled(rename = "Stat")]
    #[serde(rename = "Stat")]
    label: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct GramRow {
    #[tabled(rename = "Purity")]
    #[serde(rename = "Purity")]
    karat: String,
    #[tabled(rename = "Per Gram")]
    #[serde(rename = "Per Gram")]
    price: String,
}

#[derive(Tabled, Serialize)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    price: String,
}

// -- Row builders --

/// The four dashboard cards.
fn build_stat_rows(quote: &Quote) -> Vec<StatRow> {
    vec![
        StatRow {
            label: "Open Price".to_string(),
            value: format_usd(quote.open_price),
        },
        StatRow {
            label: "Daily High".to_string(),
            value: format_usd(quote.high_price),
        },
        StatRow {
            label: "Daily Low".to_string(),
            value: format_usd(quote.low_price),
        },
        StatRow {
            label: "24K Gram".to_string(),
            value: format!("${}/g", quote.price_gram_24k),
        },
    ]
}

fn build_gram_rows(quote: &Quote) -> Vec<GramRow> {
    Karat::ALL
        .iter()
        .map(|k| GramRow {
            karat: k.to_string(),
            price: format!("${:.4}", quote.gram_price(*k)),
        })
        .collect()
}

fn build_history_rows(points: &[HistoricalPoint]) -> Vec<HistoryRow> {
    points
        .iter()
        .map(|p| HistoryRow {
            date: p.date.to_string(),
            price: format!("{:.2}", p.price),
        })
        .collect()
}

/// Change indicator, e.g. `▲ +12.50 (0.53%)`. Flat moves use the up styling.
fn format_change(quote: &Quote) -> String {
    let arrow = match quote.change_direction() {
        ChangeDirection::Down => "▼",
        ChangeDirection::Up | ChangeDirection::Flat => "▲",
    };
    let sign = if quote.ch > 0.0 { "+" } else { "" };
    format!("{} {}{:.2} ({:.2}%)", arrow, sign, quote.ch, quote.chp)
}

fn provider_label(origin: QuoteOrigin) -> &'static str {
    match origin {
        QuoteOrigin::Live => "GOLDAPI.IO",
        QuoteOrigin::Synthetic => "SIMULATED",
    }
}

fn format_last_update(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "--:--".to_string(),
    }
}

/// `$1,234.56` style currency with thousands separators.
fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

// -- Table output --

pub fn print_dashboard(fetched: &FetchedQuote) {
    let quote = &fetched.quote;
    println!("{}/{}  {}", quote.metal, quote.currency, format_usd(quote.price));
    println!("{}", format_change(quote));
    println!("{}", Table::new(build_stat_rows(quote)));
    println!(
        "DATA PROVIDER: {}    LAST UPDATE: {}",
        provider_label(fetched.origin),
        format_last_update(quote.timestamp)
    );
}

pub fn print_grams_table(quote: &Quote) {
    println!("{}", Table::new(build_gram_rows(quote)));
}

pub fn print_history_table(points: &[HistoricalPoint]) {
    println!("{}", Table::new(build_history_rows(points)));
}

// -- CSV output --

/// Prints the stat cards as CSV. Pass `with_headers = false` for every block
/// after the first when streaming several quotes.
pub fn print_stats_csv(quote: &Quote, with_headers: bool) -> Result<()> {
    write_stats_csv(std::io::stdout(), quote, with_headers)
}

fn write_stats_csv<W: std::io::Write>(out: W, quote: &Quote, with_headers: bool) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(with_headers)
        .from_writer(out);
    for row in build_stat_rows(quote) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_history_csv(points: &[HistoricalPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_history_rows(points) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Single-line JSON, one document per line, for streaming output.
pub fn print_json_line<T: serde::Serialize>(data: &T) {
    match serde_json::to_string(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
