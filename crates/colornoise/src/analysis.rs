//! Spectral and statistical checks for generated sequences.
//!
//! Used by the CLI `analyze` command and by the statistical tests: a
//! periodogram, a log-log power-law fit whose slope estimates `-β`, and basic
//! sample moments.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, NoiseResult};

/// One-sided periodogram `|X[k]|^2 / N` for `k = 0 ..= N / 2`.
pub fn periodogram(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    let norm = 1.0 / n as f64;
    buffer[..n / 2 + 1]
        .iter()
        .map(|c| c.norm_sqr() * norm)
        .collect()
}

/// Least-squares fit of `log10 P = slope * log10 f + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralFit {
    /// Fitted slope; approximately `-β` for power-law noise.
    pub slope: f64,
    /// Fitted intercept in log10 units.
    pub intercept: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    /// Number of frequency bins used.
    pub bins: usize,
}

impl SpectralFit {
    /// Spectral exponent implied by the slope.
    pub fn exponent(&self) -> f64 {
        -self.slope
    }
}

/// Fits a power law to the periodogram of `signal`, skipping the DC bin.
///
/// # Errors
/// Returns [`NoiseError::InvalidParameter`] if fewer than three non-DC bins
/// carry power.
pub fn fit_power_law(signal: &[f64]) -> NoiseResult<SpectralFit> {
    fit_power_law_band(signal, 0.0, 0.5)
}

/// Like [`fit_power_law`], restricted to frequencies in `[fmin, fmax]`
/// (cycles per sample).
pub fn fit_power_law_band(signal: &[f64], fmin: f64, fmax: f64) -> NoiseResult<SpectralFit> {
    if fmin.is_nan() || fmax.is_nan() || fmin > fmax {
        return Err(NoiseError::invalid_param(
            "band",
            format!("fmin {} exceeds fmax {}", fmin, fmax),
        ));
    }

    let n = signal.len() as f64;
    let power = periodogram(signal);
    let points: Vec<(f64, f64)> = power
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(k, &p)| {
            let f = k as f64 / n;
            p > 0.0 && f >= fmin && f <= fmax
        })
        .map(|(k, &p)| ((k as f64 / n).log10(), p.log10()))
        .collect();

    if points.len() < 3 {
        return Err(NoiseError::invalid_param(
            "signal",
            format!(
                "need at least 3 frequency bins with power, found {}",
                points.len()
            ),
        ));
    }

    let count = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / count;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / count;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for &(x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy > 0.0 {
        (sxy * sxy) / (sxx * syy)
    } else {
        1.0
    };

    Ok(SpectralFit {
        slope,
        intercept,
        r_squared,
        bins: points.len(),
    })
}

/// Sample moments of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance (divides by `n`).
    pub variance: f64,
    /// Square root of the variance.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Computes [`SampleStats`]; `None` for an empty slice.
pub fn sample_stats(values: &[f64]) -> Option<SampleStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    Some(SampleStats {
        mean,
        variance,
        std_dev: variance.sqrt(),
        min,
        max,
    })
}
