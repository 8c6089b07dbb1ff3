//! Profile construction.
//!
//! The profile is the mean-centred cumulative sum of the input series. Series
//! that already behave like a profile (price levels, random walks) can be passed
//! through unchanged with `skip_aggregation`.

use crate::errors::{validate_all_finite, validate_data_length, MfdfaResult};

/// Build the profile analysed by the fluctuation pipeline.
///
/// With `skip_aggregation == false` this returns
/// `y[i] = Σ_{k ≤ i} (x[k] − mean(x))`; otherwise a copy of `data`.
///
/// # Errors
/// * `InsufficientData` if `data` is empty
/// * `NumericalError` if `data` contains NaN or infinite values
///
/// # Example
/// ```rust
/// use mfdfa::profile::build_profile;
///
/// let profile = build_profile(&[1.0, 2.0, 3.0, 4.0, 5.0], false).unwrap();
/// assert_eq!(profile, vec![-2.0, -3.0, -3.0, -2.0, 0.0]);
/// ```
pub fn build_profile(data: &[f64], skip_aggregation: bool) -> MfdfaResult<Vec<f64>> {
    validate_data_length(data, 1)?;
    validate_all_finite(data, "time series")?;

    if skip_aggregation {
        return Ok(data.to_vec());
    }

    Ok(integrate_series(data))
}

/// Mean-centred cumulative sum. `data` must be non-empty.
pub(crate) fn integrate_series(data: &[f64]) -> Vec<f64> {
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    let mut cumsum = 0.0;

    data.iter()
        .map(|&value| {
            cumsum += value - mean;
            cumsum
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MfdfaError;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_integrate_series_known_values() {
        // Mean = 3.0, centred = [-2, -1, 0, 1, 2]
        let profile = build_profile(&[1.0, 2.0, 3.0, 4.0, 5.0], false).unwrap();
        let expected = [-2.0, -3.0, -3.0, -2.0, 0.0];
        for (value, want) in profile.iter().zip(expected.iter()) {
            assert_approx_eq!(*value, *want, 1e-12);
        }
    }

    #[test]
    fn test_profile_ends_near_zero() {
        let data: Vec<f64> = (0..257).map(|i| ((i * 37) % 11) as f64 * 0.3 - 1.0).collect();
        let profile = build_profile(&data, false).unwrap();
        assert_eq!(profile.len(), data.len());
        assert_approx_eq!(*profile.last().unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn test_skip_aggregation_passes_through() {
        let data = vec![100.0, 101.5, 99.25, 102.0];
        let profile = build_profile(&data, true).unwrap();
        assert_eq!(profile, data);
    }

    #[test]
    fn test_single_point_profile() {
        let profile = build_profile(&[7.5], false).unwrap();
        assert_eq!(profile, vec![0.0]);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(matches!(
            build_profile(&[], false),
            Err(MfdfaError::InsufficientData { required: 1, actual: 0 })
        ));
        assert!(build_profile(&[], true).is_err());
    }

    #[test]
    fn test_non_finite_series_rejected() {
        assert!(matches!(
            build_profile(&[1.0, f64::NAN, 2.0], false),
            Err(MfdfaError::NumericalError { .. })
        ));
    }
}
