//! # Multifractal Detrended Fluctuation Analysis
//!
//! Generalized Hurst exponents `h(q)` of one-dimensional time series.
//!
//! MFDFA measures how the detrended fluctuation of a series grows with the
//! observation window, separately for each moment order `q`. A q-independent
//! `h` indicates monofractal scaling; a spread of `h(q)` across orders
//! indicates multifractality. Negative orders describe the quiet windows,
//! positive orders the volatile ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use mfdfa::{hurst, perform_mfdfa, MfdfaConfig};
//! use mfdfa::generators::{generate_fractional_gaussian_noise, FgnConfig, GeneratorConfig};
//!
//! fn main() -> Result<(), mfdfa::MfdfaError> {
//!     let config = GeneratorConfig { length: 4096, seed: Some(42) };
//!     let fgn = FgnConfig { hurst_exponent: 0.7, volatility: 1.0 };
//!     let series = generate_fractional_gaussian_noise(&config, &fgn)?;
//!
//!     // Classic DFA Hurst exponent on the default scale grid
//!     let h = hurst(&series, false, 100)?;
//!     println!("H = {:.3}", h);
//!
//!     // Full spectrum over q in [-5, 5]
//!     let analysis = perform_mfdfa(&series, &MfdfaConfig::multifractal())?;
//!     for (q, hq) in &analysis.generalized_hurst_exponents {
//!         println!("h({:+.1}) = {:.3}", q, hq);
//!     }
//!     println!("delta h = {:.3}", analysis.multifractality_degree);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Mean-centred cumulative profile | [`profile`] |
//! | Forward and backward windows per scale | [`segmentation`] |
//! | Local polynomial fit and residual variance | [`detrending`] |
//! | Order-`q` aggregation into `F_q(s)` | [`fluctuation`] |
//! | Log-log regression giving `h(q)` | [`scaling`] |
//! | Default scale grid from series length | [`parameters`] |
//!
//! [`multifractal`] ties the stages together; [`spectrum`] derives `τ(q)` and
//! `f(α)`; [`generators`] produces reference series of known `H`.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade: `debug` for the selected grid and
//! estimated exponents, `warn` for duplicate scales or scales outside
//! `20 ≤ s ≤ N/10`, `trace` for every `F_q(s)`. Install any logger to see them.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod parameters;

// Pipeline stages
pub mod detrending;
pub mod fluctuation;
pub mod profile;
pub mod scaling;
pub mod segmentation;

// Analysis
pub mod generators;
pub mod multifractal;
pub mod spectrum;

pub use config::{MfdfaConfig, ScaleSelection};
pub use errors::{MfdfaError, MfdfaResult};

pub use multifractal::{basic_dfa, dfa, hurst, perform_mfdfa, MultifractalAnalysis};
pub use parameters::{
    default_scales, select_default_parameters, DefaultParameters, DEFAULT_OBSERVATIONS,
    DEFAULT_POLYNOMIAL_ORDER, MIN_SCALE_FLOOR,
};
pub use scaling::{estimate_scaling_exponent, ScalingFit};
pub use spectrum::{mass_exponents, multifractality_degree, singularity_spectrum, spectrum_width};

pub use detrending::{detrended_variance, LocalDetrender};
pub use fluctuation::{aggregate_fluctuation, fluctuation_function, scale_variances};
pub use profile::build_profile;
pub use segmentation::{segment_window, window_count, Direction, Segment, Segmentation};

pub use generators::{
    generate_fractional_brownian_motion, generate_fractional_gaussian_noise,
    generate_random_walk, generate_white_noise, FgnConfig, GeneratorConfig,
};
