//! P-value to edge weight normalization.

use crate::analysis::PairResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightError {
    #[error("no cointegration results to normalize")]
    EmptyResultSet,
}

/// One directed edge with its full weight derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// |p-value| of the pair's test.
    pub raw_weight: f64,
    /// Min-max rescaled strength in [0, 1]; lower p-value → higher weight.
    pub normalized_weight: f64,
    /// The normalized weight if strictly above 0.5, otherwise 0.
    pub floored_weight: f64,
}

impl Edge {
    /// `(source, target, floored_weight)` triple, the form passed to
    /// graph construction and dumped on the console.
    pub fn triple(&self) -> (String, String, f64) {
        (self.source.clone(), self.target.clone(), self.floored_weight)
    }

    pub fn survives_floor(&self) -> bool {
        self.floored_weight > 0.0
    }
}

/// Turn the pairwise results into an edge list.
///
/// Weights are min-max rescaled over the whole batch, so every edge's
/// normalized weight depends on the global minimum and maximum raw
/// p-value, not just its own. The floor is a strict cutoff: a
/// normalized weight of exactly 0.5 comes out as 0.
///
/// A batch where every raw weight is identical (including a single
/// result) has no ranking information to rescale; every edge then gets
/// normalized weight 1.0. An empty batch is an error.
pub fn normalize_weights(results: &[PairResult]) -> Result<Vec<Edge>, WeightError> {
    if results.is_empty() {
        return Err(WeightError::EmptyResultSet);
    }

    let mut min_raw = f64::INFINITY;
    let mut max_raw = f64::NEG_INFINITY;
    for r in results {
        let raw = r.result.p_value.abs();
        min_raw = min_raw.min(raw);
        max_raw = max_raw.max(raw);
    }
    let range = max_raw - min_raw;

    let edges = results
        .iter()
        .map(|r| {
            let raw_weight = r.result.p_value.abs();
            let normalized_weight = if range > 0.0 {
                1.0 - ((raw_weight - min_raw) / range)
            } else {
                1.0
            };
            let floored_weight = if normalized_weight > 0.5 {
                normalized_weight
            } else {
                0.0
            };

            Edge {
                source: r.source.clone(),
                target: r.target.clone(),
                raw_weight,
                normalized_weight,
                floored_weight,
            }
        })
        .collect();

    Ok(edges)
}
