//! Default scale grid and polynomial degree.
//!
//! The grid follows the practical recommendation for financial series that
//! scales stay within `20 ≤ s ≤ N/10`:
//!
//! ```text
//! s_min = max(20, floor(N/100))
//! s_max = min(20·s_min, floor(N/10))
//! S[i]  = s_min + floor(i · (s_max − s_min) / observations),  0 ≤ i < observations
//! ```
//!
//! For `N < 200` the upper bound falls below 20 and the grid decreases from
//! `s_min` towards `s_max`. Rounding down commonly repeats scales; repeats are
//! returned as-is.

use crate::errors::{MfdfaError, MfdfaResult};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of scales in the default grid.
pub const DEFAULT_OBSERVATIONS: usize = 100;

/// Smallest recommended window length.
pub const MIN_SCALE_FLOOR: usize = 20;

/// Linear detrending.
pub const DEFAULT_POLYNOMIAL_ORDER: usize = 1;

/// Scale grid and detrending degree chosen from the series length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DefaultParameters {
    /// Window lengths, in generation order, duplicates kept
    pub scales: Vec<usize>,
    /// Polynomial degree of the local fits
    pub degree: usize,
}

/// Default scale grid for a series of `length` samples.
///
/// # Errors
/// * `InvalidParameter` if `observations == 0`
/// * `InvalidScale` if a grid point falls below 1 (series shorter than 10)
///
/// # Example
/// ```rust
/// use mfdfa::parameters::default_scales;
///
/// let scales = default_scales(10_000, 100).unwrap();
/// assert_eq!(scales.len(), 100);
/// assert_eq!(scales[0], 100);
/// assert!(scales.iter().all(|&s| (100..=1000).contains(&s)));
/// ```
pub fn default_scales(length: usize, observations: usize) -> MfdfaResult<Vec<usize>> {
    if observations == 0 {
        return Err(MfdfaError::InvalidParameter {
            parameter: "observations".to_string(),
            value: 0.0,
            constraint: "at least 1".to_string(),
        });
    }

    let (s_min, s_max) = scale_bounds(length);
    let increment = (s_max as f64 - s_min as f64) / observations as f64;

    (0..observations)
        .map(|i| {
            let scale = s_min as i64 + (i as f64 * increment).floor() as i64;
            if scale < 1 {
                return Err(MfdfaError::InvalidScale {
                    scale: 0,
                    length,
                    reason: format!(
                        "default grid point {} is {} (series too short for s_max = {})",
                        i, scale, s_max
                    ),
                });
            }
            Ok(scale as usize)
        })
        .collect()
}

/// Default scale grid together with the default polynomial degree.
pub fn select_default_parameters(
    length: usize,
    observations: usize,
) -> MfdfaResult<DefaultParameters> {
    let scales = default_scales(length, observations)?;
    log::debug!(
        "Default parameters for N = {}: {} scales in [{}, {}], degree {}",
        length,
        scales.len(),
        scales.iter().min().copied().unwrap_or(0),
        scales.iter().max().copied().unwrap_or(0),
        DEFAULT_POLYNOMIAL_ORDER
    );
    Ok(DefaultParameters {
        scales,
        degree: DEFAULT_POLYNOMIAL_ORDER,
    })
}

/// `(s_min, s_max)` for a series of `length` samples.
pub fn scale_bounds(length: usize) -> (usize, usize) {
    let s_min = MIN_SCALE_FLOOR.max(length / 100);
    let s_max = (20 * s_min).min(length / 10);
    (s_min, s_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_long_series() {
        assert_eq!(scale_bounds(1_000), (20, 100));
        assert_eq!(scale_bounds(16_384), (163, 1638));
        // s_max capped at 20·s_min
        assert_eq!(scale_bounds(1_000_000), (10_000, 100_000));
    }

    #[test]
    fn test_grid_values_n_1000() {
        // s_inc = 80 / 100 = 0.8
        let scales = default_scales(1_000, 100).unwrap();
        assert_eq!(scales.len(), 100);
        assert_eq!(&scales[..6], &[20, 20, 21, 22, 23, 24]);
        assert_eq!(scales[99], 20 + (99.0_f64 * 0.8).floor() as usize);
        assert!(scales.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_grid_small_observation_count() {
        // N = 4096: s_min = 40, s_max = 409, s_inc = 369 / 4
        let scales = default_scales(4_096, 4).unwrap();
        assert_eq!(scales, vec![40, 132, 224, 316]);
    }

    #[test]
    fn test_short_series_grid_decreases() {
        // N = 100: s_min = 20, s_max = 10, s_inc = -0.1
        let scales = default_scales(100, 100).unwrap();
        assert_eq!(scales[0], 20);
        assert_eq!(scales[1], 19);
        assert!(scales.iter().all(|&s| (10..=20).contains(&s)));
        assert!(scales.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_tiny_series_rejected() {
        // N = 5: s_max = 0, the grid reaches zero
        assert!(matches!(
            default_scales(5, 100),
            Err(MfdfaError::InvalidScale { length: 5, .. })
        ));
    }

    #[test]
    fn test_zero_observations_rejected() {
        assert!(matches!(
            default_scales(1_000, 0),
            Err(MfdfaError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_select_default_parameters() {
        let params = select_default_parameters(2_000, DEFAULT_OBSERVATIONS).unwrap();
        assert_eq!(params.degree, 1);
        assert_eq!(params.scales, default_scales(2_000, 100).unwrap());
    }
}
