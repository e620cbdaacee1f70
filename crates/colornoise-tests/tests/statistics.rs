//! Statistical properties of generated noise.
//!
//! These tests draw thousands of realizations per case; tolerances are several
//! standard errors wide so a fixed seed keeps them stable.

use colornoise::analysis::fit_power_law;
use colornoise::{create_rng, generate_power_law_noise, PowerLawNoise};
use colornoise_tests::statistics::{ensemble_mean, mean_periodogram, mean_variance, realization_stats};

const TRIALS: usize = 2000;

// ============================================================================
// 1. Unit variance
// ============================================================================

fn assert_unit_variance(exponent: f64, samples: usize, fmin: f64, seed: u32) {
    let mut rng = create_rng(seed);
    let noise = generate_power_law_noise(exponent, [TRIALS, samples], fmin, &mut rng)
        .expect("generation should succeed");
    let variance = mean_variance(&noise);
    assert!(
        (variance - 1.0).abs() < 0.1,
        "exponent={} samples={} fmin={}: mean variance {}",
        exponent,
        samples,
        fmin,
        variance
    );
}

#[test]
fn white_noise_has_unit_variance() {
    assert_unit_variance(0.0, 8, 0.0, 1);
    assert_unit_variance(0.0, 1024, 0.0, 2);
}

#[test]
fn pink_noise_has_unit_variance() {
    assert_unit_variance(1.0, 8, 0.0, 3);
    assert_unit_variance(1.0, 1024, 0.0, 4);
}

#[test]
fn brown_noise_has_unit_variance() {
    assert_unit_variance(2.0, 16, 0.0, 5);
    assert_unit_variance(2.0, 1024, 0.0, 6);
}

#[test]
fn odd_lengths_have_unit_variance() {
    assert_unit_variance(1.0, 9, 0.0, 7);
    assert_unit_variance(2.0, 257, 0.0, 8);
}

#[test]
fn blue_noise_has_unit_variance() {
    assert_unit_variance(-1.0, 64, 0.0, 9);
}

#[test]
fn cutoff_noise_has_unit_variance() {
    assert_unit_variance(1.0, 512, 0.05, 10);
    assert_unit_variance(2.0, 256, 0.2, 11);
}

// ============================================================================
// 2. Zero mean
// ============================================================================

#[test]
fn white_noise_realizations_are_near_zero_mean() {
    let mut rng = create_rng(20);
    let noise = PowerLawNoise::white()
        .generate([100, 4096], &mut rng)
        .unwrap();
    for (i, stats) in realization_stats(&noise).iter().enumerate() {
        assert!(stats.mean.abs() < 0.1, "realization {} mean {}", i, stats.mean);
    }
}

#[test]
fn colored_noise_has_zero_ensemble_mean() {
    for (exponent, seed) in [(1.0, 21), (2.0, 22)] {
        let mut rng = create_rng(seed);
        let noise = generate_power_law_noise(exponent, [TRIALS, 1024], 0.0, &mut rng).unwrap();
        let mean = ensemble_mean(&noise);
        assert!(mean.abs() < 0.1, "exponent={} ensemble mean {}", exponent, mean);
    }
}

// ============================================================================
// 3. Spectral slope
// ============================================================================

fn fitted_exponent(exponent: f64, seed: u32) -> f64 {
    let mut rng = create_rng(seed);
    let noise = generate_power_law_noise(exponent, 1usize << 16, 0.0, &mut rng).unwrap();
    let values: Vec<f64> = noise.iter().copied().collect();
    fit_power_law(&values).unwrap().exponent()
}

#[test]
fn spectral_slope_matches_exponent() {
    for (exponent, seed) in [(0.0, 30), (1.0, 31), (2.0, 32)] {
        let fitted = fitted_exponent(exponent, seed);
        assert!(
            (fitted - exponent).abs() < 0.2,
            "exponent={} fitted={}",
            exponent,
            fitted
        );
    }
}

#[test]
fn white_noise_spectrum_is_flat() {
    let mut rng = create_rng(33);
    let noise = generate_power_law_noise(0.0, 100_000usize, 0.0, &mut rng).unwrap();
    let values: Vec<f64> = noise.iter().copied().collect();
    let fit = fit_power_law(&values).unwrap();
    assert!(fit.slope.abs() < 0.05, "slope {}", fit.slope);
}

// ============================================================================
// 4. Low-frequency cutoff
// ============================================================================

#[test]
fn spectrum_is_flat_below_cutoff() {
    // samples = 64, fmin = 0.25: bins 0..16 sit below the cutoff and share
    // the envelope value of bin 16.
    let noise = PowerLawNoise::brown()
        .with_fmin(0.25)
        .generate([TRIALS, 64], &mut create_rng(40))
        .unwrap();
    let power = mean_periodogram(&noise);
    let reference = power[16];

    for (k, &p) in power.iter().enumerate().take(16).skip(1) {
        let ratio = p / reference;
        assert!(
            (ratio - 1.0).abs() < 0.2,
            "bin {} power ratio {} below cutoff",
            k,
            ratio
        );
    }

    // Above the cutoff the brown slope resumes: (16 / 24)^2 of the power.
    let ratio = power[24] / reference;
    assert!((ratio - 4.0 / 9.0).abs() < 0.1, "bin 24 power ratio {}", ratio);
}

// ============================================================================
// 5. Hermitian constraints
// ============================================================================

#[test]
fn dc_and_nyquist_bins_are_real() {
    let mut rng = create_rng(50);
    let (_, _, spectrum) = PowerLawNoise::pink()
        .synthesize_spectrum([10, 64], &mut rng)
        .unwrap();
    for lane in spectrum.rows() {
        assert_eq!(lane[0].im, 0.0);
        assert_eq!(lane[32].im, 0.0);
        assert!(lane[0].re != 0.0);
        assert!(lane[16].im != 0.0);
    }
}

#[test]
fn odd_length_last_bin_keeps_phase() {
    let mut rng = create_rng(51);
    let (_, _, spectrum) = PowerLawNoise::pink()
        .synthesize_spectrum([10, 63], &mut rng)
        .unwrap();
    let nonzero = spectrum.rows().into_iter().filter(|lane| lane[31].im != 0.0).count();
    assert_eq!(nonzero, 10);
}
