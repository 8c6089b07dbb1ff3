//! # Analysis Configuration
//!
//! Configuration for the config-driven entry point
//! [`perform_mfdfa`](crate::multifractal::perform_mfdfa): which scales to use,
//! the detrending degree, the moment orders and whether the input is already a
//! profile.

use crate::parameters::{DEFAULT_OBSERVATIONS, DEFAULT_POLYNOMIAL_ORDER};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower end of the default multifractal q grid.
pub const DEFAULT_Q_MIN: f64 = -5.0;

/// Upper end of the default multifractal q grid.
pub const DEFAULT_Q_MAX: f64 = 5.0;

/// Number of evenly spaced orders in the default multifractal q grid.
pub const DEFAULT_NUM_Q_VALUES: usize = 21;

/// How the scale set is chosen
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleSelection {
    /// Use exactly these window lengths, in this order
    Explicit(Vec<usize>),
    /// Derive the grid from the series length
    Automatic {
        /// Number of grid points
        observations: usize,
    },
}

impl Default for ScaleSelection {
    fn default() -> Self {
        ScaleSelection::Automatic {
            observations: DEFAULT_OBSERVATIONS,
        }
    }
}

/// Configuration for MFDFA
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MfdfaConfig {
    /// Scale set or the rule that derives it
    pub scales: ScaleSelection,
    /// Polynomial degree for local detrending
    pub polynomial_order: usize,
    /// Moment orders q
    pub q_orders: Vec<f64>,
    /// Treat the input as the profile itself (prices, random walks)
    pub skip_aggregation: bool,
}

impl Default for MfdfaConfig {
    fn default() -> Self {
        Self::hurst()
    }
}

impl MfdfaConfig {
    /// Monofractal configuration: automatic scales, linear detrending, `q = 2`.
    pub fn hurst() -> Self {
        Self {
            scales: ScaleSelection::default(),
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
            q_orders: vec![2.0],
            skip_aggregation: false,
        }
    }

    /// Multifractal configuration: automatic scales, linear detrending and
    /// 21 orders evenly spaced over `[-5, 5]`.
    pub fn multifractal() -> Self {
        Self {
            q_orders: q_grid(DEFAULT_Q_MIN, DEFAULT_Q_MAX, DEFAULT_NUM_Q_VALUES),
            ..Self::hurst()
        }
    }

    /// Use an explicit scale set.
    pub fn with_scales(mut self, scales: Vec<usize>) -> Self {
        self.scales = ScaleSelection::Explicit(scales);
        self
    }

    /// Use the automatic grid with `observations` points.
    pub fn with_observations(mut self, observations: usize) -> Self {
        self.scales = ScaleSelection::Automatic { observations };
        self
    }

    /// Set the detrending degree.
    pub fn with_polynomial_order(mut self, polynomial_order: usize) -> Self {
        self.polynomial_order = polynomial_order;
        self
    }

    /// Set the moment orders.
    pub fn with_q_orders(mut self, q_orders: Vec<f64>) -> Self {
        self.q_orders = q_orders;
        self
    }

    /// Treat the input as the profile.
    pub fn with_skip_aggregation(mut self, skip_aggregation: bool) -> Self {
        self.skip_aggregation = skip_aggregation;
        self
    }
}

/// `count` orders evenly spaced over `[q_min, q_max]`.
///
/// A single order yields `[q_min]`; zero yields an empty grid.
pub fn q_grid(q_min: f64, q_max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![q_min],
        _ => (0..count)
            .map(|i| q_min + (q_max - q_min) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}
