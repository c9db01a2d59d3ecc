//! Augmented Dickey-Fuller unit-root testing.

use crate::analysis::CointError;
use nalgebra::{DMatrix, DVector};

/// Minimum series length for a meaningful ADF regression.
const MIN_ADF_OBSERVATIONS: usize = 10;

/// Result of an ADF test.
///
/// H0: the series has a unit root (non-stationary).
/// H1: the series is stationary.
#[derive(Debug, Clone)]
pub struct AdfTest {
    pub statistic: f64,
    pub p_value: f64,
    /// Asymptotic critical values at the 1%/5%/10% levels.
    pub critical_values: Vec<(String, f64)>,
    /// True when the unit-root null is rejected at the 5% level.
    pub is_significant: bool,
}

/// Augmented Dickey-Fuller test with an intercept term.
///
/// Regression: `Δy_t = α + β·y_{t-1} + Σ γ_i·Δy_{t-i} + ε_t`; the
/// reported statistic is the t-value of β. The p-value is a piecewise
/// interpolation against MacKinnon-style critical values, not the full
/// response surface.
pub fn adf_test(data: &[f64], max_lag: Option<usize>) -> Result<AdfTest, CointError> {
    let n = data.len();
    if n < MIN_ADF_OBSERVATIONS {
        return Err(CointError::InsufficientObservations {
            observed: n,
            required: MIN_ADF_OBSERVATIONS,
        });
    }

    let lag = max_lag.unwrap_or_else(|| default_lag(n));
    let statistic = adf_t_statistic(data, lag, true)?;
    let p_value = interpolate_p_value(statistic, adf_critical_values(n));

    Ok(AdfTest {
        statistic,
        p_value,
        critical_values: vec![
            ("1%".to_string(), -3.43),
            ("5%".to_string(), -2.86),
            ("10%".to_string(), -2.57),
        ],
        is_significant: p_value < 0.05,
    })
}

/// Schwert-style default lag: `(n^(1/3) * 2)` clamped to `[1, n/4]`.
pub(crate) fn default_lag(n: usize) -> usize {
    let lag = ((n as f64).powf(1.0 / 3.0) * 2.0) as usize;
    lag.min(n / 4).max(1)
}

/// t-statistic of the level coefficient in the ADF regression.
///
/// With `intercept` false the deterministic term is dropped; that
/// variant serves residual series, which are mean-zero by construction.
pub(crate) fn adf_t_statistic(
    data: &[f64],
    lag: usize,
    intercept: bool,
) -> Result<f64, CointError> {
    let n = data.len();
    let num_regressors = lag + if intercept { 2 } else { 1 };
    let effective_n = n.saturating_sub(1 + lag);

    if effective_n < num_regressors + 2 {
        return Err(CointError::InsufficientObservations {
            observed: n,
            required: num_regressors + lag + 3,
        });
    }

    // First differences.
    let diff: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

    // Regressor rows: [1,] y_{t-1}, Δy_{t-1}, ..., Δy_{t-lag}.
    let mut x_data = Vec::with_capacity(effective_n * num_regressors);
    for t in lag..diff.len() {
        if intercept {
            x_data.push(1.0);
        }
        x_data.push(data[t]);
        for i in 1..=lag {
            x_data.push(diff[t - i]);
        }
    }

    let x = DMatrix::from_row_slice(effective_n, num_regressors, &x_data);
    let y = DVector::from_vec(diff[lag..].to_vec());

    // OLS: β = (X'X)^(-1) X'y
    let xtx = x.transpose() * &x;
    let xty = x.transpose() * &y;
    let xtx_inv = xtx.try_inverse().ok_or(CointError::Singular)?;
    let beta = &xtx_inv * xty;

    let residuals = &y - &x * &beta;
    let sse: f64 = residuals.iter().map(|r| r * r).sum();
    let mse = sse / (effective_n - num_regressors) as f64;

    let level_idx = usize::from(intercept);
    let se = (mse * xtx_inv[(level_idx, level_idx)]).sqrt();
    if !(se > 0.0) {
        return Err(CointError::Singular);
    }

    Ok(beta[level_idx] / se)
}

/// ADF critical values with a small finite-sample adjustment.
fn adf_critical_values(n: usize) -> [f64; 3] {
    let n = n as f64;
    [-3.43 - 6.0 / n, -2.86 - 4.0 / n, -2.57 - 3.0 / n]
}

/// Piecewise-linear p-value between 1%/5%/10% critical values,
/// exponential tails beyond them. Monotonically increasing in the
/// statistic, bounded to (0, 1).
pub(crate) fn interpolate_p_value(t_stat: f64, cv: [f64; 3]) -> f64 {
    let [cv_1, cv_5, cv_10] = cv;

    if t_stat < cv_1 {
        0.01 * (cv_1 - t_stat).exp().recip()
    } else if t_stat < cv_5 {
        0.01 + (0.05 - 0.01) * (t_stat - cv_1) / (cv_5 - cv_1)
    } else if t_stat < cv_10 {
        0.05 + (0.10 - 0.05) * (t_stat - cv_5) / (cv_10 - cv_5)
    } else {
        0.10 + 0.90 * (1.0 - (-0.5 * (t_stat - cv_10)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_adf_stationary_series() {
        // White noise: strong rejection of the unit root.
        let mut rng = StdRng::seed_from_u64(7);
        let data: Vec<f64> = (0..200).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let result = adf_test(&data, None).unwrap();
        assert!(result.statistic < -2.0);
        assert!(result.p_value < 0.05);
    }

    #[test]
    fn test_adf_random_walk() {
        // Drifting walk: the level keeps accumulating, so the unit-root
        // null survives.
        let mut rng = StdRng::seed_from_u64(7);
        let mut data = vec![0.0];
        for i in 1..200 {
            data.push(data[i - 1] + 0.05 + rng.gen_range(-0.3..0.3));
        }
        let result = adf_test(&data, None).unwrap();
        assert!(result.statistic > -3.0);
        assert!(result.p_value > 0.01);
    }

    #[test]
    fn test_adf_too_short() {
        let data = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            adf_test(&data, None),
            Err(CointError::InsufficientObservations { .. })
        ));
    }

    #[test]
    fn test_default_lag_bounds() {
        assert_eq!(default_lag(20), 5);
        assert!(default_lag(500) >= 1);
        for n in [20, 50, 100, 500, 2000] {
            let lag = default_lag(n);
            assert!(lag >= 1 && lag <= n / 4);
        }
    }

    #[test]
    fn test_p_value_anchors() {
        let cv = [-3.43, -2.86, -2.57];
        assert_abs_diff_eq!(interpolate_p_value(-3.43, cv), 0.01, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate_p_value(-2.86, cv), 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate_p_value(-2.57, cv), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_p_value_monotonic_and_bounded() {
        let cv = [-3.43, -2.86, -2.57];
        let mut prev = 0.0;
        let mut t = -8.0;
        while t < 4.0 {
            let p = interpolate_p_value(t, cv);
            assert!(p > 0.0 && p < 1.0);
            assert!(p >= prev);
            prev = p;
            t += 0.05;
        }
    }
}
