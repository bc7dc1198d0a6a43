//! CoinGecko REST client.
//!
//! Three endpoints: the paged market listing, the per-coin detail record,
//! and the historical price series. The base URL is injectable so tests can
//! point the client at a mock server.

use anyhow::{Context, Result, bail};
use chrono::DateTime;
use cli_log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{COINGECKO_API_HOST, HTTP_TIMEOUT_SECS, HTTP_USER_AGENT};
use crate::data::{Coin, CoinDetail, PricePoint};

#[derive(Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
}

/// Raw shape of `/coins/{id}/market_chart`: parallel arrays of
/// `[timestamp_ms, value]` pairs. Only `prices` is used.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

impl MarketClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(COINGECKO_API_HOST)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: base_url.into() })
    }

    /// One page of the market listing, ordered by market cap descending.
    pub async fn coin_markets(&self, currency: &str, per_page: usize) -> Result<Vec<Coin>> {
        let path = format!(
            "/api/v3/coins/markets?vs_currency={currency}&order=market_cap_desc&per_page={per_page}&page=1&sparkline=false"
        );
        self.get_json(&path).await
    }

    /// Full detail record for one coin.
    pub async fn coin_detail(&self, id: &str) -> Result<CoinDetail> {
        let path = format!(
            "/api/v3/coins/{id}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false"
        );
        self.get_json(&path).await
    }

    /// Historical price series over the last `days` days.
    pub async fn market_chart(&self, id: &str, currency: &str, days: u32) -> Result<Vec<PricePoint>> {
        let path = format!("/api/v3/coins/{id}/market_chart?vs_currency={currency}&days={days}");
        let response: MarketChartResponse = self.get_json(&path).await?;

        let mut points = Vec::with_capacity(response.prices.len());
        for (timestamp_ms, price) in response.prices {
            // Skip points whose timestamp falls outside chrono's range
            if let Some(timestamp) = DateTime::from_timestamp_millis(timestamp_ms as i64) {
                points.push(PricePoint { timestamp, price });
            }
        }
        Ok(points)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("API returned HTTP {status}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}
