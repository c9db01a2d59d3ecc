//! Price series and close-price table structures.

mod panel;
mod series;

pub use panel::ClosePanel;
pub use series::{fetch_all_series, FetchOutcome, PriceSeries};
