//! HTTP client for the spot price endpoint.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::{types::Quote, Error};

/// Production endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://www.goldapi.io";

/// HTTP client for `GET {base}/api/{metal}/{currency}`.
///
/// Sends the access token in the `x-access-token` header. One
/// `reqwest::Client` is built up front and reused for every request. No
/// timeout is set unless one is passed to [`Client::with_options`].
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    access_token: Option<String>,
}

impl Client {
    /// Creates a client pointing at the production endpoint.
    pub fn new(access_token: Option<String>) -> Result<Self, Error> {
        Self::with_options(DEFAULT_BASE_URL, access_token, None)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, access_token: Option<String>) -> Result<Self, Error> {
        Self::with_options(base_url, access_token, None)
    }

    /// Creates a client with a custom base URL and an optional request timeout.
    ///
    /// A blank token is treated the same as no token.
    pub fn with_options(
        base_url: &str,
        access_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Whether an access token is configured.
    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn quote_url(&self, metal: &str, currency: &str) -> Result<Url, Error> {
        let raw = format!("{}/api/{}/{}", self.base_api_url, metal, currency);
        Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Fetches the current quote for a metal/currency pair.
    ///
    /// The body is returned as the provider sent it. The only shape check is
    /// that it is a JSON object with a numeric `price`; derived fields such as
    /// `ch`, `chp` and the gram prices are not recomputed.
    pub async fn get_quote(&self, metal: &str, currency: &str) -> Result<Quote, Error> {
        let token = self.access_token.as_deref().ok_or(Error::MissingToken)?;
        let url = self.quote_url(metal, currency)?;

        let resp = self
            .http
            .get(url)
            .header("x-access-token", token)
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::debug!("Quote request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        parse_quote(&body)
    }
}

/// Validates and decodes a quote body.
fn parse_quote(body: &str) -> Result<Quote, Error> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::InvalidPayload(format!("{} | body: {}", e, truncate_body(body)))
    })?;

    if !value.get("price").is_some_and(Value::is_number) {
        return Err(Error::InvalidPayload(format!(
            "missing numeric price | body: {}",
            truncate_body(body)
        )));
    }

    serde_json::from_value(value).map_err(|e| Error::InvalidPayload(e.to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
