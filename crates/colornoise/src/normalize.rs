//! Unit-variance normalization.
//!
//! The expected variance of a synthesized sequence follows from the
//! amplitude envelope alone. Each interior bin `k` contributes `4 s[k]^2 / N^2`
//! (a full complex degree of freedom, counted twice for its mirrored negative
//! frequency). The Nyquist bin of an even length has one real degree of
//! freedom and no mirror, contributing `s^2 / N^2 = 4 (s/2)^2 / N^2`. The DC
//! bin only shifts the mean and is left out.

use log::debug;
use ndarray::ArrayD;

use crate::scale::FrequencyScale;

/// Theoretical standard deviation of sequences built from `scale`.
pub fn theoretical_std(scale: &FrequencyScale) -> f64 {
    let samples = scale.samples();
    let mut weights = scale.values().clone();
    let last = weights.len() - 1;

    weights[0] = 0.0;
    weights[last] *= (1 + samples % 2) as f64 / 2.0;

    let power: f64 = weights.iter().map(|w| w * w).sum();
    2.0 * power.sqrt() / samples as f64
}

/// Divides every sample by the theoretical standard deviation of `scale` and
/// returns the divisor.
pub fn normalize(output: &mut ArrayD<f64>, scale: &FrequencyScale) -> f64 {
    let std = theoretical_std(scale);
    debug!("normalizing by theoretical std {:.6e}", std);
    output.mapv_inplace(|v| v / std);
    std
}
