//! Property-based tests for shape resolution and the frequency envelope.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p colornoise-tests --test proptest_shape
//! ```

use proptest::prelude::*;

use colornoise::normalize::theoretical_std;
use colornoise::shape::MIN_SAMPLES;
use colornoise::{create_rng, FrequencyScale, IntoShape, NoiseError, PowerLawNoise, Shape};

// ============================================================================
// 1. Shape parsing
// ============================================================================

fn valid_dims() -> impl Strategy<Value = Vec<usize>> {
    (prop::collection::vec(1usize..6, 0..3), MIN_SAMPLES..300).prop_map(|(mut batch, samples)| {
        batch.push(samples);
        batch
    })
}

proptest! {
    /// Arbitrary strings never panic when parsed as a shape.
    #[test]
    fn shape_parse_never_panics(s in "[0-9x,\\[\\] -]{0,24}") {
        let _ = s.parse::<Shape>();
    }

    /// Every separator style parses to the same dimensions.
    #[test]
    fn shape_separators_agree(dims in valid_dims()) {
        let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
        let by_x: Shape = parts.join("x").parse().unwrap();
        let by_comma: Shape = parts.join(",").parse().unwrap();
        let bracketed: Shape = format!("[{}]", parts.join(", ")).parse().unwrap();

        prop_assert_eq!(by_x.dims(), &dims[..]);
        prop_assert_eq!(&by_comma, &by_x);
        prop_assert_eq!(&bracketed, &by_x);
        prop_assert_eq!(by_x.to_string().parse::<Shape>().unwrap(), by_x.clone());
    }

    /// A zero anywhere in the dimensions is rejected.
    #[test]
    fn zero_dimension_rejected(mut dims in valid_dims(), pos in any::<prop::sample::Index>()) {
        let i = pos.index(dims.len());
        dims[i] = 0;
        let err = dims.into_shape().unwrap_err();
        let is_shape_error = matches!(err, NoiseError::InvalidShape { .. });
        prop_assert!(is_shape_error, "unexpected error: {}", err);
    }

    /// Negative dimensions are rejected, never wrapped.
    #[test]
    fn negative_dimension_rejected(n in i64::MIN..0) {
        prop_assert!(Shape::from_dims(&[2, n]).is_err());
        prop_assert!(Shape::from_dims(&[n]).is_err());
    }

    /// Derived counts are consistent.
    #[test]
    fn shape_counts_consistent(dims in valid_dims()) {
        let shape = dims.clone().into_shape().unwrap();
        prop_assert_eq!(shape.samples(), *dims.last().unwrap());
        prop_assert_eq!(shape.realizations() * shape.samples(), shape.len());
        prop_assert_eq!(shape.frequency_bins(), shape.samples() / 2 + 1);
        prop_assert_eq!(shape.spectral_dims().len(), shape.ndim());
    }
}

// ============================================================================
// 2. Frequency envelope
// ============================================================================

proptest! {
    /// Scale values are finite and positive for any in-range parameters.
    #[test]
    fn scale_finite_positive(
        samples in 2usize..2048,
        exponent in -3.0f64..3.0,
        fmin in 0.0f64..=0.5,
    ) {
        let scale = FrequencyScale::new(samples, exponent, fmin).unwrap();
        prop_assert_eq!(scale.len(), samples / 2 + 1);
        prop_assert!(scale.values().iter().all(|v| v.is_finite() && *v > 0.0));
        prop_assert!(theoretical_std(&scale) > 0.0);
    }

    /// For non-negative exponents the envelope never rises with frequency.
    #[test]
    fn scale_non_increasing(
        samples in 2usize..2048,
        exponent in 0.0f64..3.0,
        fmin in 0.0f64..=0.5,
    ) {
        let scale = FrequencyScale::new(samples, exponent, fmin).unwrap();
        let values = scale.values();
        for k in 1..values.len() {
            prop_assert!(values[k] <= values[k - 1], "bin {} rises", k);
        }
    }

    /// Bins below the cutoff share the value at the cutoff index.
    #[test]
    fn cutoff_bins_flat(
        samples in 2usize..2048,
        exponent in -3.0f64..3.0,
        fmin in 0.0f64..=0.5,
    ) {
        let scale = FrequencyScale::new(samples, exponent, fmin).unwrap();
        if let Some(ix) = scale.cutoff_index() {
            let values = scale.values();
            for k in 0..ix {
                prop_assert_eq!(values[k], values[ix]);
            }
        }
    }

    /// Out-of-range cutoffs are rejected.
    #[test]
    fn fmin_out_of_range_rejected(fmin in prop_oneof![-10.0f64..-1e-9, 0.500001f64..10.0]) {
        prop_assert!(FrequencyScale::new(64, 1.0, fmin).is_err());
    }
}

// ============================================================================
// 3. Generation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Output has exactly the requested shape and only finite values.
    #[test]
    fn generated_shape_matches(
        dims in valid_dims(),
        exponent in -2.0f64..2.5,
        seed in any::<u32>(),
    ) {
        let noise = PowerLawNoise::new(exponent)
            .generate(&dims[..], &mut create_rng(seed))
            .unwrap();
        prop_assert_eq!(noise.shape(), &dims[..]);
        prop_assert!(noise.iter().all(|v| v.is_finite()));
    }
}
