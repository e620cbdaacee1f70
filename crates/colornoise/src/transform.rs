//! One-sided inverse FFT along the time axis.

use std::sync::Arc;

use log::trace;
use ndarray::{ArrayD, Axis, IxDyn};
use realfft::num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner};

use crate::error::{NoiseError, NoiseResult};

/// Complex-to-real inverse FFT of a fixed length.
///
/// Takes `samples / 2 + 1` non-negative-frequency bins and produces `samples`
/// real values; the negative-frequency half is implied by Hermitian symmetry.
/// The output is scaled by `1 / samples`, so it inverts an unscaled forward
/// transform on the `k / samples` frequency grid.
pub struct InverseRealFft {
    samples: usize,
    plan: Arc<dyn ComplexToReal<f64>>,
}

impl InverseRealFft {
    /// Plans an inverse transform producing `samples` points.
    pub fn new(samples: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let plan = planner.plan_fft_inverse(samples);
        Self { samples, plan }
    }

    /// Output length.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Expected number of input bins.
    pub fn bins(&self) -> usize {
        self.samples / 2 + 1
    }

    /// Transforms a single one-sided spectrum into `output`.
    ///
    /// `spectrum` is used as scratch space and is left in an unspecified
    /// state.
    ///
    /// # Errors
    /// Returns [`NoiseError::Transform`] if the DC bin (or the Nyquist bin of
    /// an even length) carries an imaginary part, or if the buffer lengths do
    /// not match.
    pub fn process(&self, spectrum: &mut [Complex<f64>], output: &mut [f64]) -> NoiseResult<()> {
        let mut scratch = self.plan.make_scratch_vec();
        self.process_with_scratch(spectrum, output, &mut scratch)
    }

    fn process_with_scratch(
        &self,
        spectrum: &mut [Complex<f64>],
        output: &mut [f64],
        scratch: &mut [Complex<f64>],
    ) -> NoiseResult<()> {
        self.plan.process_with_scratch(spectrum, output, scratch)?;
        let norm = 1.0 / self.samples as f64;
        for value in output.iter_mut() {
            *value *= norm;
        }
        Ok(())
    }

    /// Transforms every lane of `spectrum` along its last axis.
    ///
    /// A spectrum of shape `[*batch, samples / 2 + 1]` becomes a real array
    /// of shape `[*batch, samples]`.
    pub fn process_lanes(&self, spectrum: &ArrayD<Complex<f64>>) -> NoiseResult<ArrayD<f64>> {
        let axis = Axis(spectrum.ndim() - 1);
        if spectrum.len_of(axis) != self.bins() {
            return Err(NoiseError::invalid_shape(format!(
                "spectrum has {} bins, expected {}",
                spectrum.len_of(axis),
                self.bins()
            )));
        }

        let mut dims = spectrum.shape().to_vec();
        let last = dims.len() - 1;
        dims[last] = self.samples;
        let mut output = ArrayD::<f64>::zeros(IxDyn(&dims));

        let mut input = self.plan.make_input_vec();
        let mut buffer = self.plan.make_output_vec();
        let mut scratch = self.plan.make_scratch_vec();

        let lanes = output.lanes_mut(axis).into_iter().zip(spectrum.lanes(axis));
        for (mut out_lane, in_lane) in lanes {
            for (dst, src) in input.iter_mut().zip(in_lane.iter()) {
                *dst = *src;
            }
            self.process_with_scratch(&mut input, &mut buffer, &mut scratch)?;
            for (dst, src) in out_lane.iter_mut().zip(buffer.iter()) {
                *dst = *src;
            }
        }

        trace!(
            "inverse transform: {} lanes of {} samples",
            output.len() / self.samples,
            self.samples
        );
        Ok(output)
    }
}

impl std::fmt::Debug for InverseRealFft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InverseRealFft")
            .field("samples", &self.samples)
            .finish()
    }
}
