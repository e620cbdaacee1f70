//! colornoise integration test infrastructure
//!
//! This crate holds the slow, statistical and end-to-end tests:
//!
//! - **Statistics**: unit variance, zero mean, spectral slope, cutoff
//! - **Determinism**: bit-identical output for equal seeds
//! - **Properties**: shape parsing and envelope invariants under proptest
//! - **Spec files**: JSON spec to written output and back
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p colornoise-tests
//! cargo test -p colornoise-tests --test statistics
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use colornoise_tests::determinism::verify_determinism;
//! use colornoise_tests::test_determinism;
//!
//! let result = verify_determinism(|| spec.generate().unwrap(), 3);
//! result.assert_deterministic();
//!
//! test_determinism!(pink_default, {
//!     NoiseSpec::from_json(r#"{"shape": 256, "seed": 1}"#).unwrap().generate().unwrap()
//! });
//! ```

pub mod determinism;
pub mod statistics;
