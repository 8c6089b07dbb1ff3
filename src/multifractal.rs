//! MFDFA pipeline and public entry points.
//!
//! ```text
//! series ──▶ profile ──▶ windows(s) ──▶ F²(s,v) ──▶ F_q(s) ──▶ h(q)
//! ```
//!
//! Local variances are computed once per scale and shared by every moment
//! order. Inputs are validated in full before any window is detrended.

use crate::config::{MfdfaConfig, ScaleSelection};
use crate::errors::{
    validate_all_finite, validate_data_length, validate_q_orders, MfdfaError, MfdfaResult,
};
use crate::fluctuation::{aggregate_fluctuation, scale_variances};
use crate::parameters::{default_scales, select_default_parameters, MIN_SCALE_FLOOR};
use crate::profile::build_profile;
use crate::scaling::{estimate_scaling_exponent, ScalingFit};
use crate::spectrum::{mass_exponents, multifractality_degree, singularity_spectrum, spectrum_width};
use log::{debug, trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full result of a configured MFDFA run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultifractalAnalysis {
    /// Scales used, in the order supplied or generated
    pub scales: Vec<usize>,
    /// Degree of the local polynomial fits
    pub polynomial_order: usize,
    /// `fluctuations[i][j] = F_{q_i}(s_j)`
    pub fluctuations: Vec<Vec<f64>>,
    /// Log-log fit per moment order
    pub fits: Vec<ScalingFit>,
    /// Generalized Hurst exponents H(q)
    pub generalized_hurst_exponents: Vec<(f64, f64)>, // (q, H(q))
    /// Mass exponents τ(q)
    pub mass_exponents: Vec<(f64, f64)>, // (q, τ(q))
    /// Singularity spectrum f(α); empty with fewer than 3 distinct orders
    pub singularity_spectrum: Vec<(f64, f64)>, // (α, f(α))
    /// Δh = max H(q) − min H(q)
    pub multifractality_degree: f64,
    /// Δα of the singularity spectrum
    pub spectrum_width: f64,
}

impl MultifractalAnalysis {
    /// `h(q)` for an order that was analysed.
    pub fn hurst_exponent(&self, q: f64) -> Option<f64> {
        self.generalized_hurst_exponents
            .iter()
            .find(|(order, _)| *order == q)
            .map(|&(_, h)| h)
    }
}

/// Generalized Hurst exponents for explicit scales, degree and orders.
///
/// Returns one `h(q)` per entry of `q_orders`, in the same order.
///
/// # Errors
/// * `InsufficientData` for an empty series or fewer than 2 distinct scales
/// * `NumericalError` for non-finite input
/// * `InvalidParameter` for empty or non-finite `q_orders`, or empty `scales`
/// * `InvalidScale` for `s < 1`, `2·s > N` or `s <= degree`
/// * `DomainError` when a zero local variance meets `q <= 0`, or `F_q(s) = 0`
///
/// # Example
/// ```rust
/// use mfdfa::multifractal::dfa;
///
/// let x: Vec<f64> = (0..2000).map(|i| ((i * 7919) % 1000) as f64 / 1000.0 - 0.5).collect();
/// let h = dfa(&x, &[20, 40, 80, 160], 1, &[-2.0, 2.0], false).unwrap();
/// assert_eq!(h.len(), 2);
/// ```
pub fn dfa(
    x: &[f64],
    scales: &[usize],
    degree: usize,
    q_orders: &[f64],
    skip_aggregation: bool,
) -> MfdfaResult<Vec<f64>> {
    let (_, fits) = run_pipeline(x, scales, degree, q_orders, skip_aggregation)?;
    Ok(fits.iter().map(|fit| fit.slope).collect())
}

/// [`dfa`] with the default scale grid and linear detrending.
pub fn basic_dfa(
    x: &[f64],
    q_orders: &[f64],
    skip_aggregation: bool,
    observations: usize,
) -> MfdfaResult<Vec<f64>> {
    validate_series(x)?;
    let params = select_default_parameters(x.len(), observations)?;
    dfa(x, &params.scales, params.degree, q_orders, skip_aggregation)
}

/// Hurst exponent: [`basic_dfa`] at `q = 2`.
///
/// # Example
/// ```rust
/// use mfdfa::generators::{generate_white_noise, GeneratorConfig};
/// use mfdfa::multifractal::hurst;
///
/// let config = GeneratorConfig { length: 4096, seed: Some(1) };
/// let noise = generate_white_noise(&config, 1.0).unwrap();
/// let h = hurst(&noise, false, 50).unwrap();
/// assert!(h > 0.3 && h < 0.7);
/// ```
pub fn hurst(x: &[f64], skip_aggregation: bool, observations: usize) -> MfdfaResult<f64> {
    basic_dfa(x, &[2.0], skip_aggregation, observations)?
        .first()
        .copied()
        .ok_or_else(|| MfdfaError::NumericalError {
            reason: "no exponent estimated for q = 2".to_string(),
            operation: Some("hurst".to_string()),
        })
}

/// Run MFDFA under `config` and return the full analysis.
pub fn perform_mfdfa(x: &[f64], config: &MfdfaConfig) -> MfdfaResult<MultifractalAnalysis> {
    validate_series(x)?;

    let scales = match &config.scales {
        ScaleSelection::Explicit(scales) => scales.clone(),
        ScaleSelection::Automatic { observations } => default_scales(x.len(), *observations)?,
    };

    let (fluctuations, fits) = run_pipeline(
        x,
        &scales,
        config.polynomial_order,
        &config.q_orders,
        config.skip_aggregation,
    )?;

    let generalized_hurst: Vec<(f64, f64)> = fits.iter().map(|fit| (fit.q, fit.slope)).collect();
    let tau = mass_exponents(&generalized_hurst);

    let mut distinct_tau = tau.clone();
    distinct_tau.sort_by(|a, b| a.0.total_cmp(&b.0));
    distinct_tau.dedup_by(|a, b| a.0 == b.0);
    let spectrum = if distinct_tau.len() >= 3 {
        singularity_spectrum(&distinct_tau)?
    } else {
        Vec::new()
    };

    let analysis = MultifractalAnalysis {
        polynomial_order: config.polynomial_order,
        fluctuations,
        fits,
        multifractality_degree: multifractality_degree(&generalized_hurst),
        spectrum_width: spectrum_width(&spectrum),
        generalized_hurst_exponents: generalized_hurst,
        mass_exponents: tau,
        singularity_spectrum: spectrum,
        scales,
    };

    debug!(
        "MFDFA complete: {} orders over {} scales, delta h = {:.4}",
        analysis.fits.len(),
        analysis.scales.len(),
        analysis.multifractality_degree
    );
    Ok(analysis)
}

/// Validate, build the profile and compute the `F_q(s)` table and fits.
fn run_pipeline(
    x: &[f64],
    scales: &[usize],
    degree: usize,
    q_orders: &[f64],
    skip_aggregation: bool,
) -> MfdfaResult<(Vec<Vec<f64>>, Vec<ScalingFit>)> {
    validate_inputs(x, scales, degree, q_orders)?;

    let profile = build_profile(x, skip_aggregation)?;
    let mut table = vec![Vec::with_capacity(scales.len()); q_orders.len()];

    for &scale in scales {
        let variances = scale_variances(&profile, scale, degree)?;
        for (row, &q) in table.iter_mut().zip(q_orders) {
            let fq = aggregate_fluctuation(&variances, q, scale)?;
            trace!("F_{}({}) = {:.6e}", q, scale, fq);
            row.push(fq);
        }
    }

    let fits = q_orders
        .iter()
        .zip(&table)
        .map(|(&q, row)| estimate_scaling_exponent(q, scales, row))
        .collect::<MfdfaResult<Vec<ScalingFit>>>()?;

    for fit in &fits {
        debug!(
            "h({}) = {:.4} (r^2 = {:.4}, {} points)",
            fit.q, fit.slope, fit.r_squared, fit.points
        );
    }

    Ok((table, fits))
}

fn validate_series(x: &[f64]) -> MfdfaResult<()> {
    validate_data_length(x, 1)?;
    validate_all_finite(x, "time series")
}

/// Boundary checks; nothing is computed until all of them pass.
fn validate_inputs(x: &[f64], scales: &[usize], degree: usize, q_orders: &[f64]) -> MfdfaResult<()> {
    validate_series(x)?;
    validate_q_orders(q_orders)?;

    if scales.is_empty() {
        return Err(MfdfaError::InvalidParameter {
            parameter: "scales".to_string(),
            value: 0.0,
            constraint: "at least one scale".to_string(),
        });
    }

    let n = x.len();
    for &scale in scales {
        let reason = if scale < 1 {
            Some("scale must be at least 1".to_string())
        } else if scale > n / 2 {
            Some(format!("scale exceeds half the series length ({})", n / 2))
        } else if scale <= degree {
            Some(format!(
                "scale must exceed polynomial degree {}",
                degree
            ))
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(MfdfaError::InvalidScale {
                scale,
                length: n,
                reason,
            });
        }
    }

    let mut distinct = scales.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(MfdfaError::InsufficientData {
            required: 2,
            actual: distinct.len(),
        });
    }
    if distinct.len() < scales.len() {
        warn!(
            "{} duplicate scales kept as independent regression points",
            scales.len() - distinct.len()
        );
    }

    let upper = n / 10;
    let outside = distinct
        .iter()
        .filter(|&&s| s < MIN_SCALE_FLOOR || s > upper)
        .count();
    if outside > 0 {
        warn!(
            "{} of {} scales outside the recommended range [{}, {}] for N = {}",
            outside,
            distinct.len(),
            MIN_SCALE_FLOOR,
            upper,
            n
        );
    }

    Ok(())
}
