//! Structural invariants of segmentation, the default grid and the estimator.

use mfdfa::generators::{generate_white_noise, GeneratorConfig};
use mfdfa::parameters::scale_bounds;
use mfdfa::{
    basic_dfa, default_scales, dfa, perform_mfdfa, window_count, Direction, MfdfaConfig,
    Segmentation, MIN_SCALE_FLOOR,
};
use proptest::prelude::*;

fn noise(length: usize, seed: u64) -> Vec<f64> {
    generate_white_noise(
        &GeneratorConfig {
            length,
            seed: Some(seed),
        },
        1.0,
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn window_count_is_twice_floor(n in 2usize..5_000, divisor in 0.0f64..1.0) {
        // Every admissible scale 1 <= s <= n/2
        let scale = 1 + ((n / 2 - 1) as f64 * divisor) as usize;
        let segmentation = Segmentation::new(n, scale).unwrap();
        let segments: Vec<_> = segmentation.segments().collect();

        prop_assert_eq!(segments.len(), 2 * (n / scale));
        prop_assert_eq!(segments.len(), window_count(n, scale));
        prop_assert!(segments.iter().all(|s| s.range().end <= n && s.range().len() == scale));

        let forward = segments.iter().filter(|s| s.direction == Direction::Forward).count();
        prop_assert_eq!(forward, n / scale);
        // First forward window starts the series, first backward window ends it
        prop_assert_eq!(segments[0].start, 0);
        prop_assert_eq!(segments[forward].range().end, n);
    }

    #[test]
    fn default_grid_respects_bounds(n in 200usize..500_000, observations in 1usize..300) {
        let (s_min, s_max) = scale_bounds(n);
        prop_assert!(s_min >= MIN_SCALE_FLOOR);
        prop_assert!(s_max <= n / 10);

        let scales = default_scales(n, observations).unwrap();
        prop_assert_eq!(scales.len(), observations);
        prop_assert_eq!(scales[0], s_min);
        prop_assert!(scales.iter().all(|&s| s >= s_min && s <= s_max));
        prop_assert!(scales.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_q_zero_is_continuous_limit() {
    let x = noise(4096, 77);
    let scales = [16, 24, 40, 64, 100, 160, 256];
    let h = dfa(&x, &scales, 1, &[0.0, 1e-6, -1e-6], false).unwrap();
    assert!((h[0] - h[1]).abs() < 1e-3, "h(0) = {}, h(1e-6) = {}", h[0], h[1]);
    assert!((h[0] - h[2]).abs() < 1e-3, "h(0) = {}, h(-1e-6) = {}", h[0], h[2]);
}

#[test]
fn test_bit_identical_reruns() {
    let x = noise(5000, 5);
    let q = [-4.0, -1.0, 0.0, 1.0, 4.0];
    let first = basic_dfa(&x, &q, false, 60).unwrap();
    let second = basic_dfa(&x, &q, false, 60).unwrap();
    assert_eq!(
        first.iter().map(|h| h.to_bits()).collect::<Vec<_>>(),
        second.iter().map(|h| h.to_bits()).collect::<Vec<_>>()
    );

    let config = MfdfaConfig::multifractal().with_observations(30);
    assert_eq!(perform_mfdfa(&x, &config).unwrap(), perform_mfdfa(&x, &config).unwrap());
}

#[test]
fn test_white_noise_is_monofractal() {
    let x = noise(8192, 9);
    let config = MfdfaConfig::multifractal().with_observations(40);
    let analysis = perform_mfdfa(&x, &config).unwrap();
    for &(q, h) in &analysis.generalized_hurst_exponents {
        assert!((h - 0.5).abs() < 0.2, "h({}) = {}", q, h);
    }
    assert!(analysis.multifractality_degree < 0.3);
}

#[test]
fn test_duplicate_scales_are_regression_weights() {
    let x = noise(3000, 44);
    let single = dfa(&x, &[20, 60, 150], 1, &[2.0], false).unwrap();
    let repeated = dfa(&x, &[20, 60, 60, 150], 1, &[2.0], false).unwrap();
    assert!(single[0].is_finite() && repeated[0].is_finite());
    // A repeated scale shifts the fit unless all three points are collinear
    assert_ne!(single[0], repeated[0]);
}
