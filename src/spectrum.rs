//! Multifractal spectrum descriptors derived from `h(q)`.
//!
//! - Mass exponents `τ(q) = q·h(q) − 1`
//! - Singularity spectrum `(α, f(α))` by Legendre transform of `τ(q)`:
//!   `α = dτ/dq`, `f(α) = q·α − τ(q)`
//! - Multifractality degree `Δh = max h(q) − min h(q)`
//!
//! A monofractal series has a q-independent `h`, so its spectrum collapses
//! to the single point `(H, 1)` and `Δh ≈ 0`.

use crate::errors::{MfdfaError, MfdfaResult};

/// `τ(q) = q·h(q) − 1` for each `(q, h(q))` pair, order preserved.
pub fn mass_exponents(generalized_hurst: &[(f64, f64)]) -> Vec<(f64, f64)> {
    generalized_hurst
        .iter()
        .map(|&(q, h)| (q, q * h - 1.0))
        .collect()
}

/// Singularity spectrum `(α, f(α))` from `(q, τ(q))` pairs.
///
/// Pairs are sorted by `q` first. `dτ/dq` uses central differences in the
/// interior and one-sided differences at both ends, so one spectrum point is
/// returned per order, in ascending `q`.
///
/// # Errors
/// * `InsufficientData` with fewer than 3 orders
/// * `InvalidParameter` if an order is repeated
/// * `NumericalError` if any value is not finite
///
/// # Example
/// ```rust
/// use mfdfa::spectrum::{mass_exponents, singularity_spectrum};
///
/// // Monofractal: h(q) = 0.6 for every q
/// let hq: Vec<(f64, f64)> = (-3..=3).map(|q| (q as f64, 0.6)).collect();
/// let spectrum = singularity_spectrum(&mass_exponents(&hq)).unwrap();
/// for (alpha, f) in spectrum {
///     assert!((alpha - 0.6).abs() < 1e-12);
///     assert!((f - 1.0).abs() < 1e-12);
/// }
/// ```
pub fn singularity_spectrum(mass_exponents: &[(f64, f64)]) -> MfdfaResult<Vec<(f64, f64)>> {
    if mass_exponents.len() < 3 {
        return Err(MfdfaError::InsufficientData {
            required: 3,
            actual: mass_exponents.len(),
        });
    }

    if mass_exponents
        .iter()
        .any(|(q, tau)| !q.is_finite() || !tau.is_finite())
    {
        return Err(MfdfaError::NumericalError {
            reason: "mass exponents contain non-finite values".to_string(),
            operation: Some("singularity_spectrum".to_string()),
        });
    }

    let mut sorted = mass_exponents.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    if let Some(pair) = sorted.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(MfdfaError::InvalidParameter {
            parameter: "q".to_string(),
            value: pair[0].0,
            constraint: "distinct moment orders for the Legendre transform".to_string(),
        });
    }

    let last = sorted.len() - 1;
    let spectrum = (0..sorted.len())
        .map(|i| {
            let (lo, hi) = match i {
                0 => (0, 1),
                i if i == last => (last - 1, last),
                i => (i - 1, i + 1),
            };
            let alpha = (sorted[hi].1 - sorted[lo].1) / (sorted[hi].0 - sorted[lo].0);
            let (q, tau) = sorted[i];
            (alpha, q * alpha - tau)
        })
        .collect();

    Ok(spectrum)
}

/// `Δh = max h(q) − min h(q)`; zero for fewer than two orders.
pub fn multifractality_degree(generalized_hurst: &[(f64, f64)]) -> f64 {
    if generalized_hurst.len() < 2 {
        return 0.0;
    }
    range_of(generalized_hurst.iter().map(|&(_, h)| h))
}

/// `Δα = max α − min α`; zero for fewer than two points.
pub fn spectrum_width(singularity_spectrum: &[(f64, f64)]) -> f64 {
    if singularity_spectrum.len() < 2 {
        return 0.0;
    }
    range_of(singularity_spectrum.iter().map(|&(alpha, _)| alpha))
}

fn range_of(values: impl Iterator<Item = f64>) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    max - min
}
