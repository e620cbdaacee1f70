//! Output shape resolution.
//!
//! A noise request names its output extent either as a single length or as a
//! sequence of dimensions. The last dimension is always the time axis; every
//! leading dimension indexes an independent realization.

use std::fmt;
use std::str::FromStr;

use crate::error::{NoiseError, NoiseResult};

/// Smallest usable time-axis length.
///
/// A single sample has no non-DC frequency bin, so its theoretical standard
/// deviation would be zero.
pub const MIN_SAMPLES: usize = 2;

/// Validated output shape. The last dimension is the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Builds a shape from explicit dimensions.
    ///
    /// # Errors
    /// Returns [`NoiseError::InvalidShape`] if `dims` is empty, contains a
    /// zero, has fewer than [`MIN_SAMPLES`] samples on the time axis, or
    /// describes more elements than fit in `usize`.
    pub fn new(dims: Vec<usize>) -> NoiseResult<Self> {
        if dims.is_empty() {
            return Err(NoiseError::invalid_shape("shape must have at least one dimension"));
        }

        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(NoiseError::invalid_shape(format!(
                "dimension {} must be positive, got 0",
                axis
            )));
        }

        let samples = dims[dims.len() - 1];
        if samples < MIN_SAMPLES {
            return Err(NoiseError::invalid_shape(format!(
                "time axis needs at least {} samples, got {}",
                MIN_SAMPLES, samples
            )));
        }

        // Spectral arrays are about half the size of the output, so checking
        // the output count covers both.
        dims.iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| {
                NoiseError::invalid_shape(format!("shape {:?} overflows the element count", dims))
            })?;

        Ok(Self { dims })
    }

    /// Builds a shape from dimensions of any integer type, rejecting values
    /// that are zero, negative, or do not fit in `usize`.
    pub fn from_dims<T>(dims: &[T]) -> NoiseResult<Self>
    where
        T: Copy + fmt::Display + TryInto<usize>,
    {
        let dims = dims
            .iter()
            .enumerate()
            .map(|(axis, &d)| {
                d.try_into()
                    .ok()
                    .filter(|&d: &usize| d > 0)
                    .ok_or_else(|| {
                        NoiseError::invalid_shape(format!(
                            "dimension {} must be a positive integer, got {}",
                            axis, d
                        ))
                    })
            })
            .collect::<NoiseResult<Vec<_>>>()?;
        Self::new(dims)
    }

    /// All dimensions, time axis last.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Length of the time axis.
    pub fn samples(&self) -> usize {
        self.dims[self.dims.len() - 1]
    }

    /// Leading (batch) dimensions. Empty for a single sequence.
    pub fn batch_dims(&self) -> &[usize] {
        &self.dims[..self.dims.len() - 1]
    }

    /// Number of independent realizations.
    pub fn realizations(&self) -> usize {
        self.batch_dims().iter().product()
    }

    /// Total number of output samples.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// Always false: a valid shape holds at least [`MIN_SAMPLES`] elements.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of one-sided frequency bins, `samples / 2 + 1`.
    pub fn frequency_bins(&self) -> usize {
        self.samples() / 2 + 1
    }

    /// Shape of the one-sided spectrum: batch dimensions followed by the
    /// frequency-bin count.
    pub fn spectral_dims(&self) -> Vec<usize> {
        let mut dims = self.dims.clone();
        let last = dims.len() - 1;
        dims[last] = self.frequency_bins();
        dims
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.dims.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}

/// Parses `"1024"`, `"4x1024"`, `"4,1024"` or `"[4, 1024]"`.
impl FromStr for Shape {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        if trimmed.trim().is_empty() {
            return Err(NoiseError::invalid_shape("shape string is empty"));
        }

        let dims = trimmed
            .split(|c: char| c == 'x' || c == 'X' || c == ',')
            .map(|token| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| {
                    NoiseError::invalid_shape(format!("'{}' is not an integer", token))
                })
            })
            .collect::<NoiseResult<Vec<_>>>()?;

        Self::from_dims(&dims)
    }
}

/// Conversion into a validated [`Shape`].
///
/// Implemented for a single length and for the usual sequence types, so a
/// caller can pass `1024`, `[4, 1024]`, `vec![4, 1024]` or `&dims[..]`.
pub trait IntoShape {
    /// Validates and converts `self` into a [`Shape`].
    fn into_shape(self) -> NoiseResult<Shape>;
}

impl IntoShape for Shape {
    fn into_shape(self) -> NoiseResult<Shape> {
        Ok(self)
    }
}

impl IntoShape for &Shape {
    fn into_shape(self) -> NoiseResult<Shape> {
        Ok(self.clone())
    }
}

macro_rules! impl_into_shape {
    ($($t:ty),*) => {$(
        impl IntoShape for $t {
            fn into_shape(self) -> NoiseResult<Shape> {
                Shape::from_dims(&[self])
            }
        }

        impl IntoShape for Vec<$t> {
            fn into_shape(self) -> NoiseResult<Shape> {
                Shape::from_dims(&self)
            }
        }

        impl IntoShape for &[$t] {
            fn into_shape(self) -> NoiseResult<Shape> {
                Shape::from_dims(self)
            }
        }

        impl<const N: usize> IntoShape for [$t; N] {
            fn into_shape(self) -> NoiseResult<Shape> {
                Shape::from_dims(&self)
            }
        }
    )*};
}

impl_into_shape!(usize, u32, u64, i32, i64);

impl IntoShape for &str {
    fn into_shape(self) -> NoiseResult<Shape> {
        self.parse()
    }
}
