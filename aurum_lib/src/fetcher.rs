//! Live-or-synthetic quote acquisition.
//!
//! [`QuoteFetcher`] never fails from the caller's point of view: transport,
//! status and payload errors are logged and replaced by a synthetic quote
//! after a short pause, so the consumer always has something to show.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use aurum_api::types::{HistoricalPoint, Quote};
use aurum_api::Client;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::synth::{synthesize_history, synthesize_quote};

/// Where a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteOrigin {
    /// Parsed from the provider response.
    Live,
    /// Generated locally after the live call failed.
    Synthetic,
}

/// A quote tagged with its origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchedQuote {
    pub quote: Quote,
    pub origin: QuoteOrigin,
}

/// Fetches quotes from the live endpoint, falling back to synthetic data.
pub struct QuoteFetcher {
    client: Client,
    metal: String,
    currency: String,
    fallback_delay: Duration,
    rng: Mutex<StdRng>,
}

impl QuoteFetcher {
    /// Validates `config` and builds a fetcher with an entropy-seeded RNG.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        config.validate()?;
        let client = Client::with_options(
            &config.base_url,
            config.access_token.clone(),
            config.request_timeout,
        )?;
        Ok(Self::with_client(client, config))
    }

    /// Builds a fetcher around an existing client. Only the pair and the
    /// fallback delay are taken from `config`.
    pub fn with_client(client: Client, config: &FeedConfig) -> Self {
        Self {
            client,
            metal: config.metal.clone(),
            currency: config.currency.clone(),
            fallback_delay: config.fallback_delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the random source with a seeded one for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches one quote and reports whether it is live or synthetic.
    pub async fn fetch(&self) -> FetchedQuote {
        match self.client.get_quote(&self.metal, &self.currency).await {
            Ok(quote) => {
                tracing::debug!(price = quote.price, "Live quote received");
                FetchedQuote {
                    quote,
                    origin: QuoteOrigin::Live,
                }
            }
            Err(e) => {
                tracing::warn!(
                    category = e.category(),
                    error = %e,
                    "Fetching {}/{} price failed, simulating live data",
                    self.metal,
                    self.currency
                );
                tokio::time::sleep(self.fallback_delay).await;
                let quote = synthesize_quote(&mut *self.rng(), Utc::now());
                FetchedQuote {
                    quote,
                    origin: QuoteOrigin::Synthetic,
                }
            }
        }
    }

    /// Fetches one quote. Always returns a usable value.
    pub async fn fetch_quote(&self) -> Quote {
        self.fetch().await.quote
    }

    /// Synthesizes one year of daily closes ending today (UTC), anchored to
    /// `target` when given.
    pub async fn fetch_history(&self, target: Option<f64>) -> Vec<HistoricalPoint> {
        let today = Utc::now().date_naive();
        synthesize_history(&mut *self.rng(), today, target)
    }
}
