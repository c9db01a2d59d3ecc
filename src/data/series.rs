//! Per-ticker price history and the fetch stage.

use crate::api::{DailyBar, ProviderError, StooqClient};
use chrono::NaiveDate;

/// Daily price history for a single ticker, sorted ascending by date.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<DailyBar>,
}

impl PriceSeries {
    pub fn new(ticker: &str, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self {
            ticker: ticker.to_string(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Trading dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

/// Result of the fetch stage: fetched series in input ticker order,
/// plus one recorded failure per ticker that could not be fetched.
#[derive(Debug)]
pub struct FetchOutcome {
    pub series: Vec<PriceSeries>,
    pub failures: Vec<(String, ProviderError)>,
}

impl FetchOutcome {
    pub fn fetched_tickers(&self) -> Vec<String> {
        self.series.iter().map(|s| s.ticker.clone()).collect()
    }
}

/// Fetch daily history for each ticker, isolating failures per ticker.
///
/// One fetch attempt per ticker, no retry. A failed ticker gets one
/// diagnostic line and is dropped from the output; the rest proceed.
pub fn fetch_all_series(
    client: &StooqClient,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> FetchOutcome {
    let mut series = Vec::new();
    let mut failures = Vec::new();

    for ticker in tickers {
        println!("Fetching data for {}...", ticker);
        match client.daily_bars(ticker, start, end) {
            Ok(bars) => series.push(PriceSeries::new(ticker, bars)),
            Err(e) => {
                println!("Failed to fetch {}: {}", ticker, e);
                failures.push((ticker.clone(), e));
            }
        }
    }

    FetchOutcome { series, failures }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: NaiveDate, close: f64) -> DailyBar {
        DailyBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: Some(1000.0),
        }
    }

    #[test]
    fn test_series_sorted_on_construction() {
        let d1 = NaiveDate::from_ymd_opt(2016, 2, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2016, 2, 1).unwrap();
        let series = PriceSeries::new("AAPL", vec![bar(d1, 94.48), bar(d2, 96.43)]);

        assert_eq!(series.dates(), vec![d2, d1]);
        assert_eq!(series.closes(), vec![96.43, 94.48]);
    }

    #[test]
    fn test_fetch_failures_are_isolated() {
        // Unroutable base URL: every ticker fails, none aborts the stage.
        let client = StooqClient::with_base_url("http://127.0.0.1:1");
        let tickers = vec!["AAA".to_string(), "BBB".to_string()];
        let start = NaiveDate::from_ymd_opt(2016, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2016, 4, 1).unwrap();

        let outcome = fetch_all_series(&client, &tickers, start, end);
        assert!(outcome.series.is_empty());
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].0, "AAA");
    }
}
