//! Library layer for Aurum Flow: live-or-synthetic quote fetching, synthetic
//! data generators, and a polling controller.
//!
//! Wraps the `aurum_api` client so that consumers always receive a quote:
//! any live failure is logged and replaced with internally consistent
//! synthetic data.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod poller;
pub mod synth;

pub use aurum_api;
pub use aurum_api::types;

pub use config::FeedConfig;
pub use error::FeedError;
pub use fetcher::{FetchedQuote, QuoteFetcher, QuoteOrigin};
pub use poller::{FetchState, PollerHandle, QuotePoller};
