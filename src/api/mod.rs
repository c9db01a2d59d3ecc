//! Market data provider integration.

mod stooq;

pub use stooq::{parse_daily_csv, DailyBar, ProviderError, StooqClient};
