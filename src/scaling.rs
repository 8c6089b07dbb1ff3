//! Log-log regression of `F_q(s)` on `s`.

use crate::errors::{MfdfaError, MfdfaResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Least-squares fit of `ln F_q(s) = intercept + slope · ln s`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalingFit {
    /// Moment order the fit belongs to
    pub q: f64,
    /// Generalized Hurst exponent `h(q)`
    pub slope: f64,
    /// `ln F_q` at `ln s = 0`
    pub intercept: f64,
    /// Coefficient of determination of the log-log fit
    pub r_squared: f64,
    /// Number of (scale, fluctuation) pairs used, duplicates included
    pub points: usize,
}

/// Estimate `h(q)` as the OLS slope of `ln F_q(s)` against `ln s`.
///
/// Repeated scales enter as independent observations; at least two distinct
/// scales are required for the slope to be identified.
///
/// # Errors
/// * `InvalidParameter` if the slices differ in length
/// * `InsufficientData` with fewer than 2 distinct scales
/// * `InvalidScale` for a zero scale
/// * `DomainError` if any `F_q(s) <= 0` or is not finite
///
/// # Example
/// ```rust
/// use mfdfa::scaling::estimate_scaling_exponent;
///
/// let scales = [10, 20, 40, 80];
/// let fluctuations: Vec<f64> = scales.iter().map(|&s| 0.3 * (s as f64).powf(0.7)).collect();
/// let fit = estimate_scaling_exponent(2.0, &scales, &fluctuations).unwrap();
/// assert!((fit.slope - 0.7).abs() < 1e-12);
/// ```
pub fn estimate_scaling_exponent(
    q: f64,
    scales: &[usize],
    fluctuations: &[f64],
) -> MfdfaResult<ScalingFit> {
    if scales.len() != fluctuations.len() {
        return Err(MfdfaError::InvalidParameter {
            parameter: "fluctuations".to_string(),
            value: fluctuations.len() as f64,
            constraint: format!("one value per scale ({} scales)", scales.len()),
        });
    }

    if let Some(&scale) = scales.iter().find(|&&s| s == 0) {
        return Err(MfdfaError::InvalidScale {
            scale,
            length: 0,
            reason: "logarithm of a zero scale".to_string(),
        });
    }

    let distinct = count_distinct(scales);
    if distinct < 2 {
        return Err(MfdfaError::InsufficientData {
            required: 2,
            actual: distinct,
        });
    }

    for (&scale, &f) in scales.iter().zip(fluctuations) {
        if !(f.is_finite() && f > 0.0) {
            return Err(MfdfaError::DomainError {
                q,
                scale,
                window: None,
                reason: format!("logarithm of non-positive fluctuation {}", f),
            });
        }
    }

    let x: Vec<f64> = scales.iter().map(|&s| (s as f64).ln()).collect();
    let y: Vec<f64> = fluctuations.iter().map(|f| f.ln()).collect();
    let (slope, intercept, r_squared) = centred_ols(&x, &y)?;

    Ok(ScalingFit {
        q,
        slope,
        intercept,
        r_squared,
        points: x.len(),
    })
}

/// Simple linear regression on centred data.
///
/// Returns `(slope, intercept, r_squared)`. A flat response with zero residual
/// has `r_squared = 1`.
fn centred_ols(x: &[f64], y: &[f64]) -> MfdfaResult<(f64, f64, f64)> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 {
        return Err(MfdfaError::NumericalError {
            reason: "log-scales have zero variance".to_string(),
            operation: Some("scaling_regression".to_string()),
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| {
            let residual = yi - (intercept + slope * xi);
            residual * residual
        })
        .sum();
    let r_squared = if syy > 0.0 {
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    } else {
        1.0
    };

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(MfdfaError::NumericalError {
            reason: format!("regression produced slope {} intercept {}", slope, intercept),
            operation: Some("scaling_regression".to_string()),
        });
    }

    Ok((slope, intercept, r_squared))
}

fn count_distinct(scales: &[usize]) -> usize {
    let mut sorted = scales.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_exact_power_law() {
        let scales = vec![16, 32, 64, 128, 256];
        let fluctuations: Vec<f64> = scales.iter().map(|&s| 2.5 * (s as f64).powf(0.35)).collect();
        let fit = estimate_scaling_exponent(-3.0, &scales, &fluctuations).unwrap();
        assert_approx_eq!(fit.slope, 0.35, 1e-12);
        assert_approx_eq!(fit.intercept, 2.5_f64.ln(), 1e-12);
        assert_approx_eq!(fit.r_squared, 1.0, 1e-12);
        assert_eq!(fit.q, -3.0);
        assert_eq!(fit.points, 5);
    }

    #[test]
    fn test_noisy_fit_r_squared_below_one() {
        let scales = vec![10, 20, 30, 40, 50, 60];
        let fluctuations = vec![1.0, 2.2, 2.6, 4.5, 4.1, 6.3];
        let fit = estimate_scaling_exponent(2.0, &scales, &fluctuations).unwrap();
        assert!(fit.slope > 0.5 && fit.slope < 1.5, "slope = {}", fit.slope);
        assert!(fit.r_squared > 0.8 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_duplicates_count_as_observations() {
        // Two copies of scale 10 with different values pull the fit towards their mean
        let fit = estimate_scaling_exponent(2.0, &[10, 10, 100], &[1.0, 4.0, 20.0]).unwrap();
        assert_eq!(fit.points, 3);

        let x = [10f64.ln(), 10f64.ln(), 100f64.ln()];
        let y = [1f64.ln(), 4f64.ln(), 20f64.ln()];
        let mean_x = x.iter().sum::<f64>() / 3.0;
        let mean_y = y.iter().sum::<f64>() / 3.0;
        let sxy: f64 = x.iter().zip(&y).map(|(a, b)| (a - mean_x) * (b - mean_y)).sum();
        let sxx: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
        assert_approx_eq!(fit.slope, sxy / sxx, 1e-12);
    }

    #[test]
    fn test_requires_two_distinct_scales() {
        assert_eq!(
            estimate_scaling_exponent(2.0, &[20, 20, 20], &[1.0, 1.1, 0.9]),
            Err(MfdfaError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert!(matches!(
            estimate_scaling_exponent(2.0, &[], &[]),
            Err(MfdfaError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn test_non_positive_fluctuation_is_domain_error() {
        match estimate_scaling_exponent(0.0, &[10, 20, 40], &[1.0, 0.0, 2.0]) {
            Err(MfdfaError::DomainError { q, scale, window, .. }) => {
                assert_eq!(q, 0.0);
                assert_eq!(scale, 20);
                assert_eq!(window, None);
            }
            other => panic!("Expected DomainError, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(matches!(
            estimate_scaling_exponent(2.0, &[10, 20, 40], &[1.0, 2.0]),
            Err(MfdfaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_flat_fluctuations_zero_slope() {
        let fit = estimate_scaling_exponent(2.0, &[10, 20, 40], &[3.0, 3.0, 3.0]).unwrap();
        assert_approx_eq!(fit.slope, 0.0, 1e-12);
        assert_eq!(fit.r_squared, 1.0);
    }
}
