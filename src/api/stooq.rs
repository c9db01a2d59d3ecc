//! Stooq daily-bar client implementation

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const STOOQ_BASE_URL: &str = "https://stooq.com";

/// Errors from the market data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {status} for {symbol}")]
    Http { symbol: String, status: u16 },

    #[error("malformed CSV response: {0}")]
    Csv(#[from] csv::Error),

    #[error("no data returned for {symbol}")]
    NoData { symbol: String },
}

/// One daily OHLC record as served by Stooq.
///
/// Volume is optional: indices and some thinly traded instruments
/// come back with an empty volume field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Stooq API client for fetching daily price history.
#[derive(Debug, Clone)]
pub struct StooqClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for StooqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StooqClient {
    /// Create a new Stooq client
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: STOOQ_BASE_URL.to_string(),
        }
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Fetch daily OHLC bars for one ticker over an inclusive date range.
    ///
    /// Returns bars sorted ascending by date. An unknown symbol or an
    /// empty window surfaces as [`ProviderError::NoData`].
    pub fn daily_bars(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, ProviderError> {
        let url = format!(
            "{}/q/d/l/?s={}&d1={}&d2={}&i=d",
            self.base_url,
            to_stooq_symbol(ticker),
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        );

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(ProviderError::Http {
                symbol: ticker.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text()?;
        let mut bars = parse_daily_csv(&body)?;

        if bars.is_empty() {
            return Err(ProviderError::NoData {
                symbol: ticker.to_string(),
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

/// Parse a Stooq daily CSV body (`Date,Open,High,Low,Close,Volume`).
///
/// A body with no data rows (unknown symbols answer with a plain
/// "No data" line) parses to an empty vector.
pub fn parse_daily_csv(body: &str) -> Result<Vec<DailyBar>, ProviderError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut bars = Vec::new();

    for record in reader.deserialize::<DailyBar>() {
        bars.push(record?);
    }

    Ok(bars)
}

/// Map a plain US ticker to Stooq's symbol convention.
fn to_stooq_symbol(ticker: &str) -> String {
    format!("{}.us", ticker.to_lowercase())
}
