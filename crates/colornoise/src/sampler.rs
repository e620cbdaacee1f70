//! Random spectral realizations.
//!
//! Each realization is a one-sided spectrum with independent standard-normal
//! real and imaginary parts, scaled by the frequency envelope. The DC bin and,
//! for even lengths, the Nyquist bin are kept purely real so that the inverse
//! transform yields a real sequence.

use log::debug;
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use realfft::num_complex::Complex;

use crate::error::{NoiseError, NoiseResult};
use crate::scale::FrequencyScale;
use crate::shape::Shape;

/// Draws an array of independent standard-normal values.
///
/// Values are drawn in row-major order, so the same generator state always
/// fills the same positions.
pub fn standard_normal<R: Rng + ?Sized>(dims: &[usize], rng: &mut R) -> NoiseResult<ArrayD<f64>> {
    let len: usize = dims.iter().product();
    let values: Vec<f64> = (0..len)
        .map(|_| -> f64 { StandardNormal.sample(&mut *rng) })
        .collect();
    ArrayD::from_shape_vec(IxDyn(dims), values)
        .map_err(|e| NoiseError::invalid_shape(format!("cannot allocate {:?}: {}", dims, e)))
}

/// Zeros the imaginary draws that must vanish for a real inverse transform.
///
/// `imag` has the frequency axis last. Bin 0 is always zeroed; the last bin is
/// zeroed when `samples` is even, since it is then the Nyquist frequency.
pub fn enforce_real_bins(imag: &mut ArrayD<f64>, samples: usize) {
    let axis = Axis(imag.ndim() - 1);
    let bins = imag.len_of(axis);

    imag.index_axis_mut(axis, 0).fill(0.0);
    if samples % 2 == 0 {
        imag.index_axis_mut(axis, bins - 1).fill(0.0);
    }
}

/// Draws one scaled spectrum per realization of `shape`.
///
/// All real parts are drawn before any imaginary part.
pub fn sample_spectrum<R: Rng + ?Sized>(
    shape: &Shape,
    scale: &FrequencyScale,
    rng: &mut R,
) -> NoiseResult<ArrayD<Complex<f64>>> {
    if scale.samples() != shape.samples() {
        return Err(NoiseError::invalid_param(
            "scale",
            format!(
                "built for {} samples but shape has {}",
                scale.samples(),
                shape.samples()
            ),
        ));
    }

    let dims = shape.spectral_dims();
    let real = standard_normal(&dims, rng)?;
    let mut imag = standard_normal(&dims, rng)?;
    enforce_real_bins(&mut imag, shape.samples());

    let envelope = scale.broadcast(shape.batch_dims())?;
    let spectrum = Zip::from(&real)
        .and(&imag)
        .and(&envelope)
        .map_collect(|&re, &im, &s| Complex::new(re, im) * s);

    debug!(
        "sampled spectrum: dims={:?} realizations={}",
        dims,
        shape.realizations()
    );
    Ok(spectrum)
}
