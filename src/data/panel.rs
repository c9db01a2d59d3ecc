//! Date-indexed close-price table.

use crate::data::PriceSeries;
use chrono::NaiveDate;
use ndarray::{Array1, Array2};
use std::collections::{BTreeSet, HashMap};

/// Close prices reshaped into a single table: one column per ticker,
/// one row per trading date.
///
/// The row index is the union of all dates seen across the input series;
/// a cell where a ticker has no bar for that date holds NaN. No further
/// alignment or interpolation is performed here; pairs with too little
/// overlap fail later, in the cointegration test itself.
#[derive(Debug, Clone)]
pub struct ClosePanel {
    pub tickers: Vec<String>,
    pub dates: Vec<NaiveDate>,
    /// Close prices (rows = dates, cols = tickers); NaN marks a missing bar.
    pub closes: Array2<f64>,
}

impl ClosePanel {
    /// Build the panel from fetched series, preserving series order.
    pub fn from_series(series: &[PriceSeries]) -> Self {
        let date_set: BTreeSet<NaiveDate> = series
            .iter()
            .flat_map(|s| s.bars.iter().map(|b| b.date))
            .collect();
        let dates: Vec<NaiveDate> = date_set.into_iter().collect();

        let date_index: HashMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, &d)| (d, i)).collect();

        let tickers: Vec<String> = series.iter().map(|s| s.ticker.clone()).collect();
        let mut closes = Array2::from_elem((dates.len(), tickers.len()), f64::NAN);

        for (col, s) in series.iter().enumerate() {
            for b in &s.bars {
                if let Some(&row) = date_index.get(&b.date) {
                    closes[[row, col]] = b.close;
                }
            }
        }

        Self {
            tickers,
            dates,
            closes,
        }
    }

    pub fn n_tickers(&self) -> usize {
        self.tickers.len()
    }

    pub fn n_dates(&self) -> usize {
        self.dates.len()
    }

    /// Column index of a ticker.
    pub fn ticker_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Close column for a ticker, NaN holes included.
    pub fn closes_for(&self, ticker: &str) -> Option<Array1<f64>> {
        let idx = self.ticker_index(ticker)?;
        Some(self.closes.column(idx).to_owned())
    }

    /// Extract two close columns restricted to rows where both have a price.
    ///
    /// Columns are addressed by index; callers iterate `0..n_tickers()`.
    pub fn aligned_pair(&self, a: usize, b: usize) -> (Vec<f64>, Vec<f64>) {
        let col_a = self.closes.column(a);
        let col_b = self.closes.column(b);

        let mut xs = Vec::with_capacity(self.n_dates());
        let mut ys = Vec::with_capacity(self.n_dates());
        for (&va, &vb) in col_a.iter().zip(col_b.iter()) {
            if va.is_finite() && vb.is_finite() {
                xs.push(va);
                ys.push(vb);
            }
        }

        (xs, ys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DailyBar;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 2, d).unwrap()
    }

    fn series(ticker: &str, points: &[(u32, f64)]) -> PriceSeries {
        let bars = points
            .iter()
            .map(|&(d, close)| DailyBar {
                date: day(d),
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            })
            .collect();
        PriceSeries::new(ticker, bars)
    }

    #[test]
    fn test_union_of_dates_with_nan_holes() {
        let a = series("A", &[(1, 10.0), (2, 11.0), (3, 12.0)]);
        let b = series("B", &[(2, 20.0), (3, 21.0), (4, 22.0)]);
        let panel = ClosePanel::from_series(&[a, b]);

        assert_eq!(panel.n_tickers(), 2);
        assert_eq!(panel.n_dates(), 4);
        assert_eq!(panel.dates, vec![day(1), day(2), day(3), day(4)]);

        // A has no bar on day 4, B none on day 1.
        assert!(panel.closes[[3, 0]].is_nan());
        assert!(panel.closes[[0, 1]].is_nan());
        assert_eq!(panel.closes[[1, 0]], 11.0);
        assert_eq!(panel.closes[[1, 1]], 20.0);
    }

    #[test]
    fn test_aligned_pair_drops_incomplete_rows() {
        let a = series("A", &[(1, 10.0), (2, 11.0), (3, 12.0)]);
        let b = series("B", &[(2, 20.0), (3, 21.0), (4, 22.0)]);
        let panel = ClosePanel::from_series(&[a, b]);

        let (xs, ys) = panel.aligned_pair(0, 1);
        assert_eq!(xs, vec![11.0, 12.0]);
        assert_eq!(ys, vec![20.0, 21.0]);
    }

    #[test]
    fn test_closes_for_preserves_holes() {
        let a = series("A", &[(1, 10.0)]);
        let b = series("B", &[(1, 20.0), (2, 21.0)]);
        let panel = ClosePanel::from_series(&[a, b]);

        let col = panel.closes_for("A").unwrap();
        assert_eq!(col.len(), 2);
        assert_eq!(col[0], 10.0);
        assert!(col[1].is_nan());
        assert!(panel.closes_for("C").is_none());
    }

    #[test]
    fn test_empty_panel() {
        let panel = ClosePanel::from_series(&[]);
        assert_eq!(panel.n_tickers(), 0);
        assert_eq!(panel.n_dates(), 0);
    }
}
