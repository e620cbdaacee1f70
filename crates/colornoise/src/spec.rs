//! Declarative noise specs.
//!
//! A [`NoiseSpec`] is the JSON form of a generation request:
//!
//! ```json
//! { "exponent": "pink", "shape": [4, 4096], "fmin": 0.0, "seed": 42 }
//! ```
//!
//! `exponent` is either a number or a color name; `shape` is either a single
//! length or an array of dimensions with the time axis last.

use std::fmt;
use std::path::Path;

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::color::NoiseColor;
use crate::error::{NoiseError, NoiseResult};
use crate::generate::PowerLawNoise;
use crate::rng::{create_rng, create_variation_rng};
use crate::shape::Shape;

/// Spectral exponent given either numerically or by color name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exponent {
    /// Explicit β.
    Value(f64),
    /// Named color.
    Color(NoiseColor),
}

impl Exponent {
    /// Numeric β.
    pub fn value(self) -> f64 {
        match self {
            Exponent::Value(v) => v,
            Exponent::Color(c) => c.exponent(),
        }
    }
}

impl Default for Exponent {
    fn default() -> Self {
        Exponent::Color(NoiseColor::Pink)
    }
}

impl From<f64> for Exponent {
    fn from(value: f64) -> Self {
        Exponent::Value(value)
    }
}

impl From<NoiseColor> for Exponent {
    fn from(color: NoiseColor) -> Self {
        Exponent::Color(color)
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exponent::Value(v) => write!(f, "{}", v),
            Exponent::Color(c) => write!(f, "{} ({})", c, c.exponent()),
        }
    }
}

/// Shape as written in JSON: one length or a list of dimensions.
///
/// Signed, with a catch-all variant, so that negative or non-integer entries
/// surface as shape errors rather than deserialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeSpec {
    /// A single sequence of this length.
    Length(i64),
    /// Dimensions, time axis last.
    Dims(Vec<i64>),
    /// Any other JSON value; rejected by [`resolve`](Self::resolve).
    Malformed(serde_json::Value),
}

impl ShapeSpec {
    /// Validates into a [`Shape`].
    pub fn resolve(&self) -> NoiseResult<Shape> {
        match self {
            ShapeSpec::Length(n) => Shape::from_dims(&[*n]),
            ShapeSpec::Dims(dims) => Shape::from_dims(dims),
            ShapeSpec::Malformed(value) => Err(malformed_shape(value)),
        }
    }
}

fn malformed_shape(value: &serde_json::Value) -> NoiseError {
    if let serde_json::Value::Array(items) = value {
        if let Some((axis, item)) = items.iter().enumerate().find(|(_, v)| v.as_i64().is_none()) {
            return NoiseError::invalid_shape(format!(
                "dimension {} must be an integer, got {}",
                axis, item
            ));
        }
    }
    NoiseError::invalid_shape(format!(
        "expected an integer or an array of integers, got {}",
        value
    ))
}

impl From<&Shape> for ShapeSpec {
    fn from(shape: &Shape) -> Self {
        let dims: Vec<i64> = shape.dims().iter().map(|&d| d as i64).collect();
        if dims.len() == 1 {
            ShapeSpec::Length(dims[0])
        } else {
            ShapeSpec::Dims(dims)
        }
    }
}

/// A complete, reproducible noise request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseSpec {
    /// Spectral exponent β.
    #[serde(default)]
    pub exponent: Exponent,
    /// Output shape, time axis last.
    pub shape: ShapeSpec,
    /// Low-frequency cutoff in cycles per sample.
    #[serde(default)]
    pub fmin: f64,
    /// RNG seed.
    #[serde(default)]
    pub seed: u32,
}

impl NoiseSpec {
    /// Creates a spec for the given exponent and shape with default cutoff
    /// and seed.
    pub fn new(exponent: impl Into<Exponent>, shape: &Shape) -> Self {
        Self {
            exponent: exponent.into(),
            shape: shape.into(),
            fmin: 0.0,
            seed: 0,
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the low-frequency cutoff.
    pub fn with_fmin(mut self, fmin: f64) -> Self {
        self.fmin = fmin;
        self
    }

    /// Parses a spec from JSON.
    pub fn from_json(json: &str) -> NoiseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a spec file.
    pub fn from_file(path: impl AsRef<Path>) -> NoiseResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the spec as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> NoiseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The generator described by this spec.
    pub fn noise(&self) -> PowerLawNoise {
        PowerLawNoise::new(self.exponent.value()).with_fmin(self.fmin)
    }

    /// Checks the shape and parameters without generating anything.
    pub fn validate(&self) -> NoiseResult<Shape> {
        let shape = self.shape.resolve()?;
        self.noise().scale(shape.samples())?;
        Ok(shape)
    }

    /// Generates the noise, seeding PCG32 with `seed`.
    pub fn generate(&self) -> NoiseResult<ArrayD<f64>> {
        let shape = self.validate()?;
        let mut rng = create_rng(self.seed);
        self.noise().generate(shape, &mut rng)
    }

    /// Generates the `index`-th variation, seeded from `seed` and `index`.
    pub fn generate_variation(&self, index: u32) -> NoiseResult<ArrayD<f64>> {
        let shape = self.validate()?;
        let mut rng = create_variation_rng(self.seed, index);
        self.noise().generate(shape, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::IntoShape;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_numeric_exponent() {
        let spec = NoiseSpec::from_json(r#"{"exponent": 1.5, "shape": [2, 64], "seed": 7}"#)
            .unwrap();
        assert_eq!(spec.exponent.value(), 1.5);
        assert_eq!(spec.shape, ShapeSpec::Dims(vec![2, 64]));
        assert_eq!(spec.fmin, 0.0);
        assert_eq!(spec.seed, 7);
    }

    #[test]
    fn test_parse_color_and_length() {
        let spec = NoiseSpec::from_json(r#"{"exponent": "brown", "shape": 128}"#).unwrap();
        assert_eq!(spec.exponent, Exponent::Color(NoiseColor::Brown));
        assert_eq!(spec.exponent.value(), 2.0);
        assert_eq!(spec.validate().unwrap().dims(), &[128usize]);
    }

    #[test]
    fn test_missing_exponent_defaults_to_pink() {
        let spec = NoiseSpec::from_json(r#"{"shape": 16}"#).unwrap();
        assert_eq!(spec.exponent.value(), 1.0);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = NoiseSpec::from_json(r#"{"shape": 16, "colour": "pink"}"#).unwrap_err();
        assert_eq!(err.code(), "NOISE_004");
    }

    #[test]
    fn test_negative_dimension_is_shape_error() {
        let spec = NoiseSpec::from_json(r#"{"shape": [4, -16]}"#).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, NoiseError::InvalidShape { .. }));
    }

    #[test]
    fn test_fractional_dimension_is_shape_error() {
        let spec = NoiseSpec::from_json(r#"{"shape": [4, 16.5]}"#).unwrap();
        let err = spec.validate().unwrap_err();
        assert_eq!(err.code(), "NOISE_001");
        assert!(err.to_string().contains("dimension 1"));
        assert!(err.to_string().contains("16.5"));

        let spec = NoiseSpec::from_json(r#"{"shape": 16.5}"#).unwrap();
        assert!(matches!(spec.validate(), Err(NoiseError::InvalidShape { .. })));
    }

    #[test]
    fn test_string_shape_is_shape_error() {
        let spec = NoiseSpec::from_json(r#"{"shape": "abc"}"#).unwrap();
        let err = spec.generate().unwrap_err();
        assert_eq!(err.code(), "NOISE_001");
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_out_of_range_fmin_fails_validation() {
        let spec = NoiseSpec::from_json(r#"{"shape": 16, "fmin": 0.9}"#).unwrap();
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, NoiseError::InvalidParameter { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let shape = [3usize, 32].into_shape().unwrap();
        let spec = NoiseSpec::new(NoiseColor::Pink, &shape)
            .with_seed(99)
            .with_fmin(0.05);
        let json = spec.to_json_pretty().unwrap();
        assert_eq!(NoiseSpec::from_json(&json).unwrap(), spec);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let spec = NoiseSpec::from_json(r#"{"exponent": 1, "shape": [2, 32], "seed": 5}"#)
            .unwrap();
        let a = spec.generate().unwrap();
        let b = spec.generate().unwrap();
        assert_eq!(a.shape(), &[2, 32]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_variations_differ() {
        let spec = NoiseSpec::from_json(r#"{"shape": 32, "seed": 5}"#).unwrap();
        let v0 = spec.generate_variation(0).unwrap();
        let v1 = spec.generate_variation(1).unwrap();
        assert_ne!(v0, v1);
        assert_eq!(v0, spec.generate_variation(0).unwrap());
    }
}
