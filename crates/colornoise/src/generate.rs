//! Power-law noise synthesis.
//!
//! Implements the Timmer & Koenig (1995) method: a one-sided spectrum with
//! amplitude `f^(-β/2)` and Gaussian real and imaginary parts is inverse
//! transformed and divided by its theoretical standard deviation.

use log::debug;
use ndarray::ArrayD;
use rand::Rng;
use realfft::num_complex::Complex;

use crate::color::NoiseColor;
use crate::error::NoiseResult;
use crate::normalize::normalize;
use crate::sampler::sample_spectrum;
use crate::scale::FrequencyScale;
use crate::shape::{IntoShape, Shape};
use crate::transform::InverseRealFft;

/// Gaussian noise with power spectral density proportional to `f^(-exponent)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawNoise {
    /// Spectral exponent β.
    pub exponent: f64,
    /// Low-frequency cutoff in cycles per sample; 0 disables it.
    pub fmin: f64,
}

impl PowerLawNoise {
    /// Creates a generator for the given exponent with no cutoff.
    pub fn new(exponent: f64) -> Self {
        Self { exponent, fmin: 0.0 }
    }

    /// Creates white noise generator.
    pub fn white() -> Self {
        Self::from_color(NoiseColor::White)
    }

    /// Creates pink noise generator.
    pub fn pink() -> Self {
        Self::from_color(NoiseColor::Pink)
    }

    /// Creates brown noise generator.
    pub fn brown() -> Self {
        Self::from_color(NoiseColor::Brown)
    }

    /// Creates a generator for a named color.
    pub fn from_color(color: NoiseColor) -> Self {
        Self::new(color.exponent())
    }

    /// Sets the low-frequency cutoff.
    pub fn with_fmin(mut self, fmin: f64) -> Self {
        self.fmin = fmin;
        self
    }

    /// Builds the amplitude envelope for `samples` points.
    pub fn scale(&self, samples: usize) -> NoiseResult<FrequencyScale> {
        FrequencyScale::new(samples, self.exponent, self.fmin)
    }

    /// Draws the scaled one-sided spectra without transforming them.
    ///
    /// Consumes the same random values, in the same order, as
    /// [`generate`](Self::generate).
    pub fn synthesize_spectrum<S, R>(
        &self,
        shape: S,
        rng: &mut R,
    ) -> NoiseResult<(Shape, FrequencyScale, ArrayD<Complex<f64>>)>
    where
        S: IntoShape,
        R: Rng + ?Sized,
    {
        let shape = shape.into_shape()?;
        let scale = self.scale(shape.samples())?;
        let spectrum = sample_spectrum(&shape, &scale, rng)?;
        Ok((shape, scale, spectrum))
    }

    /// Generates unit-variance noise with the requested shape.
    ///
    /// The last axis of `shape` is time; every other index selects an
    /// independent realization sharing the same spectral envelope.
    pub fn generate<S, R>(&self, shape: S, rng: &mut R) -> NoiseResult<ArrayD<f64>>
    where
        S: IntoShape,
        R: Rng + ?Sized,
    {
        let (shape, scale, spectrum) = self.synthesize_spectrum(shape, rng)?;
        debug!(
            "generating {} noise: exponent={} fmin={}",
            shape, self.exponent, self.fmin
        );

        let fft = InverseRealFft::new(shape.samples());
        let mut output = fft.process_lanes(&spectrum)?;
        normalize(&mut output, &scale);

        Ok(output)
    }
}

/// Gaussian `(1/f)^exponent` noise, normalized to unit variance.
///
/// `shape` may be a single length or a sequence of dimensions whose last entry
/// is the time axis. `fmin` is the low-frequency cutoff in cycles per sample
/// (0 for none, at most 0.5).
///
/// The time axis needs at least [`MIN_SAMPLES`](crate::shape::MIN_SAMPLES)
/// (2) samples; a single-sample sequence is rejected with
/// [`NoiseError::InvalidShape`](crate::NoiseError::InvalidShape).
///
/// # Example
/// ```
/// use colornoise::{create_rng, generate_power_law_noise};
///
/// let mut rng = create_rng(42);
/// let pink = generate_power_law_noise(1.0, 5, 0.0, &mut rng).unwrap();
/// assert_eq!(pink.shape(), &[5]);
/// ```
pub fn generate_power_law_noise<S, R>(
    exponent: f64,
    shape: S,
    fmin: f64,
    rng: &mut R,
) -> NoiseResult<ArrayD<f64>>
where
    S: IntoShape,
    R: Rng + ?Sized,
{
    PowerLawNoise::new(exponent).with_fmin(fmin).generate(shape, rng)
}
