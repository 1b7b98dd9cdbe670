//! Feed configuration read from environment variables.

use std::time::Duration;

use aurum_api::DEFAULT_BASE_URL;

use crate::error::FeedError;

pub const ENV_ACCESS_TOKEN: &str = "GOLDAPI_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "AURUM_BASE_URL";
pub const ENV_METAL: &str = "AURUM_METAL";
pub const ENV_CURRENCY: &str = "AURUM_CURRENCY";
pub const ENV_POLL_INTERVAL_SECS: &str = "AURUM_POLL_INTERVAL_SECS";
pub const ENV_FALLBACK_DELAY_MS: &str = "AURUM_FALLBACK_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "AURUM_REQUEST_TIMEOUT_SECS";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
const DEFAULT_FALLBACK_DELAY_MS: u64 = 600;

/// Everything needed to build a [`QuoteFetcher`](crate::QuoteFetcher) and
/// a [`QuotePoller`](crate::QuotePoller).
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Sent as `x-access-token`. `None` makes every live call fail.
    pub access_token: Option<String>,
    pub base_url: String,
    pub metal: String,
    pub currency: String,
    pub poll_interval: Duration,
    /// Pause before a synthetic quote is returned.
    pub fallback_delay: Duration,
    /// Applied to live requests when set; otherwise the transport decides.
    pub request_timeout: Option<Duration>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            metal: "XAU".to_string(),
            currency: "USD".to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
            request_timeout: None,
        }
    }
}

impl FeedConfig {
    /// Reads the process environment. Unset or unparsable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse_u64 = |key: &str| non_empty(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            access_token: non_empty(ENV_ACCESS_TOKEN),
            base_url: non_empty(ENV_BASE_URL).unwrap_or(defaults.base_url),
            metal: non_empty(ENV_METAL)
                .map(|v| v.trim().to_uppercase())
                .unwrap_or(defaults.metal),
            currency: non_empty(ENV_CURRENCY)
                .map(|v| v.trim().to_uppercase())
                .unwrap_or(defaults.currency),
            poll_interval: parse_u64(ENV_POLL_INTERVAL_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            fallback_delay: parse_u64(ENV_FALLBACK_DELAY_MS)
                .map(Duration::from_millis)
                .unwrap_or(defaults.fallback_delay),
            request_timeout: parse_u64(ENV_REQUEST_TIMEOUT_SECS).map(Duration::from_secs),
        }
    }

    pub fn validate(&self) -> Result<(), FeedError> {
        if self.poll_interval.is_zero() {
            return Err(FeedError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.metal.is_empty() || self.currency.is_empty() {
            return Err(FeedError::InvalidConfig(
                "metal and currency must not be empty".to_string(),
            ));
        }
        if let Some(timeout) = self.request_timeout {
            if timeout.is_zero() {
                return Err(FeedError::InvalidConfig(
                    "request timeout must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = FeedConfig::from_lookup(|_| None);
        assert!(config.access_token.is_none());
        assert_eq!(config.base_url, "https://www.goldapi.io");
        assert_eq!(config.metal, "XAU");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.fallback_delay, Duration::from_millis(600));
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_all_keys() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            (ENV_ACCESS_TOKEN, "goldapi-abc"),
            (ENV_BASE_URL, "http://localhost:9000"),
            (ENV_METAL, "xag"),
            (ENV_CURRENCY, "eur"),
            (ENV_POLL_INTERVAL_SECS, "15"),
            (ENV_FALLBACK_DELAY_MS, "0"),
            (ENV_REQUEST_TIMEOUT_SECS, "10"),
        ]));
        assert_eq!(config.access_token.as_deref(), Some("goldapi-abc"));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.metal, "XAG");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.fallback_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn unparsable_numbers_keep_defaults() {
        let config = FeedConfig::from_lookup(lookup_from(&[
            (ENV_POLL_INTERVAL_SECS, "soon"),
            (ENV_FALLBACK_DELAY_MS, "-5"),
        ]));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.fallback_delay, Duration::from_millis(600));
    }

    #[test]
    fn blank_token_is_none() {
        let config = FeedConfig::from_lookup(lookup_from(&[(ENV_ACCESS_TOKEN, "   ")]));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = FeedConfig {
            poll_interval: Duration::ZERO,
            ..FeedConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, FeedError::InvalidConfig(_)));
        assert!(err.to_string().contains("poll interval"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = FeedConfig {
            request_timeout: Some(Duration::ZERO),
            ..FeedConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
