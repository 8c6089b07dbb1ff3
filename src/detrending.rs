//! Local polynomial detrending.
//!
//! Every window at a given scale is fitted against the same local axis
//! `1, 2, ..., s`, so the least-squares projector depends only on `(s, m)`.
//! [`LocalDetrender`] builds the Vandermonde design and its pseudo-inverse once
//! per scale and reuses them for all `2·Ns` windows.
//!
//! The axis is mapped affinely onto `[-1, 1]` before taking powers. Polynomials
//! of degree `m` are closed under affine changes of variable, so the fitted
//! trend is identical to a fit on `1..=s`, but the design stays well
//! conditioned for large windows and higher degrees.

use crate::errors::{MfdfaError, MfdfaResult};
use crate::segmentation::Segment;
use nalgebra::{DMatrix, DVector};

/// Singular values below this are treated as zero.
const PSEUDO_INVERSE_EPSILON: f64 = 1e-12;

/// Residual energy at or below this fraction of the window energy `Σy²` is
/// rounding noise of an exact polynomial fit and is reported as `0.0`.
const EXACT_FIT_EPSILON: f64 = 1e-20;

/// Least-squares polynomial detrender for windows of one fixed length.
#[derive(Debug, Clone)]
pub struct LocalDetrender {
    scale: usize,
    degree: usize,
    /// `s × (m+1)` Vandermonde matrix on the normalised axis
    design: DMatrix<f64>,
    /// `(m+1) × s` pseudo-inverse of `design`
    projector: DMatrix<f64>,
}

impl LocalDetrender {
    /// Prepare a degree-`degree` detrender for windows of length `scale`.
    ///
    /// # Errors
    /// `DegenerateSegment` if `scale <= degree`: an `s`-point window is
    /// interpolated exactly by any polynomial of degree `≥ s − 1` and carries
    /// no residual to measure.
    pub fn new(scale: usize, degree: usize) -> MfdfaResult<Self> {
        if scale <= degree {
            return Err(MfdfaError::DegenerateSegment {
                scale,
                window: None,
                reason: format!(
                    "polynomial degree {} is under-determined for {} samples",
                    degree, scale
                ),
            });
        }

        let design = vandermonde(scale, degree);
        let projector = design
            .clone()
            .pseudo_inverse(PSEUDO_INVERSE_EPSILON)
            .map_err(|e| MfdfaError::DegenerateSegment {
                scale,
                window: None,
                reason: format!("least-squares projector unavailable: {}", e),
            })?;

        Ok(Self {
            scale,
            degree,
            design,
            projector,
        })
    }

    /// Window length this detrender was built for.
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Polynomial degree of the local fit.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fitted polynomial trend evaluated on the local axis.
    pub fn trend(&self, window: &[f64]) -> MfdfaResult<Vec<f64>> {
        self.check_length(window, None)?;
        let y = DVector::from_column_slice(window);
        let coefficients = &self.projector * &y;
        Ok((&self.design * coefficients).iter().copied().collect())
    }

    /// Local variance `F²(s, v) = mean((y − fit)²)` of one window.
    ///
    /// A window lying on a polynomial of degree `<= m` (constant, linear, ...)
    /// yields exactly `0.0` rather than the rounding residue of the fit.
    pub fn local_variance(&self, window: &[f64]) -> MfdfaResult<f64> {
        self.variance_with_index(window, None)
    }

    /// Local variance of `segment` taken from `profile`; errors carry the
    /// segment's window index.
    pub fn segment_variance(&self, profile: &[f64], segment: &Segment) -> MfdfaResult<f64> {
        let range = segment.range();
        if range.end > profile.len() {
            return Err(MfdfaError::InvalidScale {
                scale: segment.scale,
                length: profile.len(),
                reason: format!(
                    "window {} spans samples {}..{} beyond the profile",
                    segment.index, range.start, range.end
                ),
            });
        }
        self.variance_with_index(&profile[range], Some(segment.index))
    }

    fn variance_with_index(&self, window: &[f64], index: Option<usize>) -> MfdfaResult<f64> {
        self.check_length(window, index)?;

        let y = DVector::from_column_slice(window);
        let coefficients = &self.projector * &y;
        let fitted = &self.design * coefficients;

        let rss: f64 = window
            .iter()
            .zip(fitted.iter())
            .map(|(&observed, &trend)| {
                let residual = observed - trend;
                residual * residual
            })
            .sum();
        let energy: f64 = window.iter().map(|v| v * v).sum();
        if rss.is_finite() && rss <= EXACT_FIT_EPSILON * energy {
            return Ok(0.0);
        }
        let variance = rss / self.scale as f64;

        if !variance.is_finite() {
            return Err(MfdfaError::DegenerateSegment {
                scale: self.scale,
                window: index,
                reason: format!("detrended variance is not finite: {}", variance),
            });
        }

        Ok(variance)
    }

    fn check_length(&self, window: &[f64], index: Option<usize>) -> MfdfaResult<()> {
        if window.len() != self.scale {
            return Err(MfdfaError::DegenerateSegment {
                scale: self.scale,
                window: index,
                reason: format!(
                    "window has {} samples, detrender expects {}",
                    window.len(),
                    self.scale
                ),
            });
        }
        Ok(())
    }
}

/// One-shot detrended variance of `window` at polynomial degree `degree`.
///
/// # Example
/// ```rust
/// use mfdfa::detrending::detrended_variance;
///
/// // A straight line is removed completely by a linear fit.
/// let line: Vec<f64> = (0..16).map(|i| 3.0 + 0.25 * i as f64).collect();
/// assert!(detrended_variance(&line, 1).unwrap() < 1e-20);
/// ```
pub fn detrended_variance(window: &[f64], degree: usize) -> MfdfaResult<f64> {
    LocalDetrender::new(window.len(), degree)?.local_variance(window)
}

/// Vandermonde design on the local axis `1..=s`, normalised to `[-1, 1]`.
fn vandermonde(scale: usize, degree: usize) -> DMatrix<f64> {
    let half_span = (scale as f64 - 1.0) / 2.0;
    let centre = (scale as f64 + 1.0) / 2.0;

    DMatrix::from_fn(scale, degree + 1, |row, col| {
        let x = (row + 1) as f64;
        let t = if half_span > 0.0 {
            (x - centre) / half_span
        } else {
            0.0
        };
        t.powi(col as i32)
    })
}
