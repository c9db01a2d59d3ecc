//! Statistical machinery: stationarity testing, the Engle-Granger
//! cointegration test, and the ordered-pair computation stage.

mod cointegration;
mod pairwise;
mod stationarity;

pub use cointegration::{engle_granger_test, CointegrationResult};
pub use pairwise::{compute_pairwise, PairFailure, PairResult, PairwiseOutcome};
pub use stationarity::{adf_test, AdfTest};

use thiserror::Error;

/// Errors from the cointegration machinery, one per failing pair.
#[derive(Debug, Error)]
pub enum CointError {
    #[error("insufficient overlapping observations: {observed} < {required}")]
    InsufficientObservations { observed: usize, required: usize },

    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("singular regression system")]
    Singular,
}
