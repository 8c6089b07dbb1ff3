//! Fluctuation function `F_q(s)`.
//!
//! All `2·Ns` local variances at scale `s` are combined into one value per
//! moment order `q`:
//!
//! - `q ≠ 0`: `F_q(s) = ( mean( F²(s,v)^(q/2) ) )^(1/q)`
//! - `q = 0`: `F_0(s) = exp( mean( ln F²(s,v) ) / 2 )`, the `q → 0` limit of
//!   the general form
//!
//! Negative orders emphasise the quietest windows and `q = 0` takes their
//! logarithm, so a window with zero detrended variance makes both undefined.
//! That case is reported as [`MfdfaError::DomainError`] naming the window.

use crate::detrending::LocalDetrender;
use crate::errors::{MfdfaError, MfdfaResult};
use crate::segmentation::{verify_window_count, window_count, Segmentation};

/// Local variances of every window of `profile` at `scale`, forward windows
/// first.
///
/// # Errors
/// * `InvalidScale` if the scale yields no complete window
/// * `DegenerateSegment` if `scale <= degree`
/// * `SegmentationMismatch` if the window count differs from `2·floor(N/s)`
pub fn scale_variances(profile: &[f64], scale: usize, degree: usize) -> MfdfaResult<Vec<f64>> {
    let segmentation = Segmentation::new(profile.len(), scale)?;
    let detrender = LocalDetrender::new(scale, degree)?;

    let variances = segmentation
        .segments()
        .map(|segment| detrender.segment_variance(profile, &segment))
        .collect::<MfdfaResult<Vec<f64>>>()?;

    verify_window_count(scale, window_count(profile.len(), scale), variances.len())?;
    Ok(variances)
}

/// Aggregate local variances at one scale into `F_q(s)`.
///
/// `scale` is used only to label errors.
///
/// # Example
/// ```rust
/// use mfdfa::fluctuation::aggregate_fluctuation;
///
/// let variances = [1.0, 4.0, 16.0];
/// // q = 2 is the root mean square of the local RMS values
/// let f2 = aggregate_fluctuation(&variances, 2.0, 10).unwrap();
/// assert!((f2 - 7.0_f64.sqrt()).abs() < 1e-12);
/// // q = 0 is their geometric mean
/// let f0 = aggregate_fluctuation(&variances, 0.0, 10).unwrap();
/// assert!((f0 - 2.0).abs() < 1e-12);
/// ```
pub fn aggregate_fluctuation(variances: &[f64], q: f64, scale: usize) -> MfdfaResult<f64> {
    if variances.is_empty() {
        return Err(MfdfaError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    if !q.is_finite() {
        return Err(MfdfaError::InvalidParameter {
            parameter: "q".to_string(),
            value: q,
            constraint: "finite moment order".to_string(),
        });
    }

    if let Some((i, &v)) = variances
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        return Err(MfdfaError::NumericalError {
            reason: format!(
                "local variance of window {} at scale {} is invalid: {}",
                i + 1,
                scale,
                v
            ),
            operation: Some("aggregate_fluctuation".to_string()),
        });
    }

    if q <= 0.0 {
        if let Some(i) = variances.iter().position(|&v| v == 0.0) {
            let reason = if q == 0.0 {
                "logarithm of zero local variance under logarithmic averaging"
            } else {
                "negative power of zero local variance"
            };
            return Err(MfdfaError::DomainError {
                q,
                scale,
                window: Some(i + 1),
                reason: reason.to_string(),
            });
        }
    }

    let count = variances.len() as f64;
    let fluctuation = if q == 0.0 {
        let mean_log = variances.iter().map(|v| v.ln()).sum::<f64>() / count;
        (mean_log / 2.0).exp()
    } else {
        let mean_moment = variances.iter().map(|v| v.powf(q / 2.0)).sum::<f64>() / count;
        mean_moment.powf(1.0 / q)
    };

    if !fluctuation.is_finite() {
        return Err(MfdfaError::NumericalError {
            reason: format!(
                "fluctuation function overflowed for q = {} at scale {}",
                q, scale
            ),
            operation: Some("aggregate_fluctuation".to_string()),
        });
    }

    Ok(fluctuation)
}

/// `F_q(s)` for every order in `q_orders`, sharing one detrending pass.
pub fn fluctuation_function(
    profile: &[f64],
    scale: usize,
    degree: usize,
    q_orders: &[f64],
) -> MfdfaResult<Vec<f64>> {
    let variances = scale_variances(profile, scale, degree)?;
    q_orders
        .iter()
        .map(|&q| aggregate_fluctuation(&variances, q, scale))
        .collect()
}
