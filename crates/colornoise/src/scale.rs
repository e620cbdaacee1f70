//! Frequency grid and per-bin amplitude scaling.

use log::debug;
use ndarray::{Array1, ArrayViewD, IxDyn};

use crate::error::{NoiseError, NoiseResult};

/// Highest meaningful cutoff frequency for a unit sample rate (Nyquist).
pub const MAX_FMIN: f64 = 0.5;

/// One-sided DFT frequencies `k / samples` for `k = 0 ..= samples / 2`,
/// assuming a sample rate of one.
pub fn rfft_frequencies(samples: usize) -> Array1<f64> {
    let n = samples as f64;
    Array1::from_iter((0..samples / 2 + 1).map(|k| k as f64 / n))
}

/// Per-bin amplitude envelope `f^(-exponent / 2)` for a given sequence length.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyScale {
    samples: usize,
    exponent: f64,
    fmin: f64,
    cutoff_index: Option<usize>,
    values: Array1<f64>,
}

impl FrequencyScale {
    /// Builds the scale vector for `samples` points.
    ///
    /// The DC bin uses `1 / samples` in place of zero. With `fmin > 0`, every
    /// bin below the cutoff takes the value of the first bin at or above it;
    /// if no bin reaches the cutoff the envelope is left as a pure power law.
    ///
    /// # Errors
    /// Returns [`NoiseError::InvalidParameter`] if `exponent` is not finite,
    /// is so large in magnitude that the envelope overflows, or if `fmin` lies
    /// outside `[0, 0.5]`.
    pub fn new(samples: usize, exponent: f64, fmin: f64) -> NoiseResult<Self> {
        validate_exponent(exponent)?;
        validate_fmin(fmin)?;
        if samples == 0 {
            return Err(NoiseError::invalid_param("samples", "must be positive"));
        }

        let mut s = rfft_frequencies(samples).mapv(f64::abs);
        s[0] = 1.0 / samples as f64;

        let mut cutoff_index = None;
        if fmin > 0.0 {
            let ix = s.iter().filter(|&&v| v < fmin).count();
            if ix < s.len() {
                let floor = s[ix];
                s.slice_mut(ndarray::s![..ix]).fill(floor);
                cutoff_index = Some(ix);
            }
        }

        let values = s.mapv(|v| v.powf(-exponent / 2.0));
        let power: f64 = values.iter().map(|v| v * v).sum();
        let representable = values.iter().all(|v| v.is_finite() && *v > 0.0);
        if !(representable && power.is_finite()) {
            return Err(NoiseError::invalid_param(
                "exponent",
                format!(
                    "{} is out of range for {} samples: the spectral envelope overflows or underflows",
                    exponent, samples
                ),
            ));
        }
        debug!(
            "frequency scale: samples={} bins={} exponent={} fmin={} cutoff={:?}",
            samples,
            values.len(),
            exponent,
            fmin,
            cutoff_index
        );

        Ok(Self {
            samples,
            exponent,
            fmin,
            cutoff_index,
            values,
        })
    }

    /// Sequence length this scale was built for.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Spectral exponent.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Requested low-frequency cutoff.
    pub fn fmin(&self) -> f64 {
        self.fmin
    }

    /// Number of leading bins flattened by the cutoff, if it was applied.
    pub fn cutoff_index(&self) -> Option<usize> {
        self.cutoff_index
    }

    /// Amplitude factor per frequency bin.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of frequency bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: there is at least the DC bin.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Views the scale vector with one leading axis per batch dimension so
    /// it lines up with a spectrum of shape `[*batch_dims, bins]`.
    pub fn broadcast(&self, batch_dims: &[usize]) -> NoiseResult<ArrayViewD<'_, f64>> {
        let mut dims = batch_dims.to_vec();
        dims.push(self.values.len());
        self.values.broadcast(IxDyn(&dims)).ok_or_else(|| {
            NoiseError::invalid_shape(format!(
                "cannot broadcast {} frequency bins to {:?}",
                self.values.len(),
                dims
            ))
        })
    }
}

fn validate_exponent(exponent: f64) -> NoiseResult<()> {
    if !exponent.is_finite() {
        return Err(NoiseError::invalid_param(
            "exponent",
            format!("must be finite, got {}", exponent),
        ));
    }
    Ok(())
}

fn validate_fmin(fmin: f64) -> NoiseResult<()> {
    if !(0.0..=MAX_FMIN).contains(&fmin) {
        return Err(NoiseError::invalid_param(
            "fmin",
            format!("must be in [0, {}], got {}", MAX_FMIN, fmin),
        ));
    }
    Ok(())
}
