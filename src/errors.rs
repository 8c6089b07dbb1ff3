//! Error types and validation functions for MFDFA.
//!
//! Every failure the pipeline can produce is a typed [`MfdfaError`] naming the
//! scale, moment order or window that triggered it. Nothing is silently
//! replaced with NaN or a clamped placeholder.

use thiserror::Error;

/// Error types for multifractal detrended fluctuation analysis.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MfdfaError {
    /// A requested scale cannot be segmented or detrended.
    #[error("Invalid scale {scale} for series of length {length}: {reason}")]
    InvalidScale {
        /// Offending window size
        scale: usize,
        /// Length of the profile being segmented
        length: usize,
        /// Which constraint was violated
        reason: String,
    },

    /// A window cannot be detrended at the requested polynomial degree.
    #[error("Degenerate segment at scale {scale}{}: {reason}", window_suffix(.window))]
    DegenerateSegment {
        /// Window size
        scale: usize,
        /// 1-based window index (forward windows first, then backward)
        window: Option<usize>,
        /// Description of the degeneracy
        reason: String,
    },

    /// Logarithm or negative power of a non-positive fluctuation.
    #[error("Domain error for q = {q} at scale {scale}{}: {reason}", window_suffix(.window))]
    DomainError {
        /// Moment order being aggregated
        q: f64,
        /// Window size
        scale: usize,
        /// 1-based window index when a single window is responsible
        window: Option<usize>,
        /// Description of the domain violation
        reason: String,
    },

    /// Not enough data points (or distinct scales) for the requested step.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required
        required: usize,
        /// Actually available
        actual: usize,
    },

    /// The number of produced windows differs from 2·floor(N/s).
    #[error("Segmentation mismatch at scale {scale}: expected {expected} windows, produced {actual}")]
    SegmentationMismatch {
        /// Window size
        scale: usize,
        /// 2·floor(N/s)
        expected: usize,
        /// Windows actually produced
        actual: usize,
    },

    /// Invalid parameter value.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Numerical computation produced a non-finite or otherwise unusable value.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for numerical failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },
}

fn window_suffix(window: &Option<usize>) -> String {
    match window {
        Some(w) => format!(", window {}", w),
        None => String::new(),
    }
}

/// Result type for MFDFA operations.
pub type MfdfaResult<T> = Result<T, MfdfaError>;

/// Validates that data has sufficient length for analysis.
///
/// # Example
/// ```rust
/// use mfdfa::errors::validate_data_length;
///
/// let data = vec![1.0, 2.0, 3.0];
/// assert!(validate_data_length(&data, 2).is_ok());
/// assert!(validate_data_length(&data, 5).is_err());
/// ```
pub fn validate_data_length(data: &[f64], min_required: usize) -> MfdfaResult<()> {
    if data.len() < min_required {
        Err(MfdfaError::InsufficientData {
            required: min_required,
            actual: data.len(),
        })
    } else {
        Ok(())
    }
}

/// Validates that all values in a slice are finite.
///
/// Returns on the first non-finite value, reporting its index.
pub fn validate_all_finite(data: &[f64], name: &str) -> MfdfaResult<()> {
    if let Some((i, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        let value_desc = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };

        return Err(MfdfaError::NumericalError {
            reason: format!(
                "{} contains non-finite value at index {}: {}",
                name, i, value_desc
            ),
            operation: Some("input_validation".to_string()),
        });
    }

    Ok(())
}

/// Validates the set of moment orders: non-empty and finite.
pub fn validate_q_orders(q_orders: &[f64]) -> MfdfaResult<()> {
    if q_orders.is_empty() {
        return Err(MfdfaError::InvalidParameter {
            parameter: "q_orders".to_string(),
            value: 0.0,
            constraint: "at least one moment order".to_string(),
        });
    }

    if let Some(&q) = q_orders.iter().find(|q| !q.is_finite()) {
        return Err(MfdfaError::InvalidParameter {
            parameter: "q".to_string(),
            value: q,
            constraint: "finite moment order".to_string(),
        });
    }

    Ok(())
}

/// Validates that a parameter lies in the open interval `(min, max)`.
pub fn validate_open_interval(value: f64, min: f64, max: f64, name: &str) -> MfdfaResult<()> {
    if value.is_nan() || value <= min || value >= max {
        Err(MfdfaError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("({}, {})", min, max),
        })
    } else {
        Ok(())
    }
}
