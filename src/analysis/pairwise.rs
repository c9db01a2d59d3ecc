//! Ordered-pair cointegration over the close-price table.

use crate::analysis::{engle_granger_test, CointError, CointegrationResult};
use crate::data::ClosePanel;

/// A successful test for one ordered pair.
#[derive(Debug, Clone)]
pub struct PairResult {
    pub source: String,
    pub target: String,
    pub result: CointegrationResult,
}

/// A failed test for one ordered pair.
#[derive(Debug)]
pub struct PairFailure {
    pub source: String,
    pub target: String,
    pub error: CointError,
}

/// Outcome of the pairwise stage: successes in iteration order plus one
/// recorded failure per pair that could not be tested. Together they
/// cover every ordered pair of distinct panel columns exactly once.
#[derive(Debug)]
pub struct PairwiseOutcome {
    pub results: Vec<PairResult>,
    pub failures: Vec<PairFailure>,
}

impl PairwiseOutcome {
    /// Total ordered pairs considered.
    pub fn n_pairs(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn result_for(&self, source: &str, target: &str) -> Option<&CointegrationResult> {
        self.results
            .iter()
            .find(|r| r.source == source && r.target == target)
            .map(|r| &r.result)
    }
}

/// Run the Engle-Granger test for every ordered pair of distinct
/// tickers in the panel, isolating failures per pair.
///
/// Direction matters: `(a, b)` regresses a on b, `(b, a)` the reverse,
/// so both orientations are computed independently. A failing pair gets
/// one diagnostic line naming both tickers and is dropped; the rest
/// proceed.
pub fn compute_pairwise(panel: &ClosePanel) -> PairwiseOutcome {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for (i, source) in panel.tickers.iter().enumerate() {
        for (j, target) in panel.tickers.iter().enumerate() {
            if i == j {
                continue;
            }

            let (ys, xs) = panel.aligned_pair(i, j);
            match engle_granger_test(&ys, &xs) {
                Ok(result) => results.push(PairResult {
                    source: source.clone(),
                    target: target.clone(),
                    result,
                }),
                Err(error) => {
                    println!("Cointegration failed for ({}, {}): {}", source, target, error);
                    failures.push(PairFailure {
                        source: source.clone(),
                        target: target.clone(),
                        error,
                    });
                }
            }
        }
    }

    PairwiseOutcome { results, failures }
}
