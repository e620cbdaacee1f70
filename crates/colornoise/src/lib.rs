//! Power-law (colored) Gaussian noise.
//!
//! This crate synthesizes noise whose power spectral density follows
//! `S(f) ∝ f^(-β)`: white (β = 0), pink/flicker (β = 1), Brownian (β = 2), or
//! any other finite exponent. It implements the spectral method of
//! Timmer & Koenig, *On generating power law noise*, A&A 300, 707-710 (1995).
//!
//! # Pipeline
//!
//! 1. [`shape`] - resolve the requested extent; the last axis is time.
//! 2. [`scale`] - one-sided frequency grid and `f^(-β/2)` amplitude envelope,
//!    with an optional low-frequency cutoff.
//! 3. [`sampler`] - Gaussian real and imaginary parts per bin, with real DC
//!    and Nyquist bins, scaled by the envelope.
//! 4. [`transform`] - complex-to-real inverse FFT along the time axis.
//! 5. [`normalize`] - divide by the theoretical standard deviation, giving
//!    unit variance per realization.
//!
//! # Determinism
//!
//! All randomness comes from the caller's generator. The same seeded
//! generator state always yields bit-identical output; [`create_rng`] gives
//! the PCG32 stream used by [`NoiseSpec`] and the CLI.
//!
//! # Example
//!
//! ```
//! use colornoise::{create_rng, PowerLawNoise};
//!
//! let mut rng = create_rng(42);
//! // Four independent pink-noise sequences of 1024 samples each.
//! let noise = PowerLawNoise::pink().generate([4, 1024], &mut rng)?;
//! assert_eq!(noise.shape(), &[4, 1024]);
//! # Ok::<(), colornoise::NoiseError>(())
//! ```

pub mod analysis;
pub mod color;
pub mod error;
pub mod generate;
pub mod normalize;
pub mod rng;
pub mod sampler;
pub mod scale;
pub mod shape;
pub mod spec;
pub mod transform;

// Re-export main types at crate root
pub use color::NoiseColor;
pub use error::{NoiseError, NoiseResult};
pub use generate::{generate_power_law_noise, PowerLawNoise};
pub use rng::create_rng;
pub use scale::FrequencyScale;
pub use shape::{IntoShape, Shape};
pub use spec::{Exponent, NoiseSpec, ShapeSpec};

/// BLAKE3 hash of the little-endian bytes of `samples`, as lowercase hex.
///
/// Two outputs hash equal exactly when they are bit-identical.
pub fn samples_hash<'a>(samples: impl IntoIterator<Item = &'a f64>) -> String {
    let mut hasher = blake3::Hasher::new();
    for value in samples {
        hasher.update(&value.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
