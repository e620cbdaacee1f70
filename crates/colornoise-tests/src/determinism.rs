//! Determinism verification for generated noise.
//!
//! Runs a generator several times and compares the outputs bit for bit,
//! reporting the first differing sample.

use std::fmt;

use colornoise::samples_hash;
use ndarray::ArrayD;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Shape of the first run's output.
    pub shape: Vec<usize>,
    /// BLAKE3 hash of the first run's samples.
    pub hash: String,
    /// If non-deterministic, the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// First sample that differs between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffInfo {
    /// Row-major sample index, or `None` when the shapes differ.
    pub index: Option<usize>,
    /// Value from the first run.
    pub expected: f64,
    /// Value from the differing run.
    pub actual: f64,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "Difference at sample {}: expected {:e} (0x{:016X}), got {:e} (0x{:016X}) (run {})",
                index,
                self.expected,
                self.expected.to_bits(),
                self.actual,
                self.actual.to_bits(),
                self.run_index
            ),
            None => write!(f, "Shape differs in run {}", self.run_index),
        }
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Shape: {:?}\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.shape, self.hash, diff
            );
        }
    }
}

/// Finds the first sample of `actual` whose bits differ from `expected`.
pub fn first_difference(
    expected: &ArrayD<f64>,
    actual: &ArrayD<f64>,
    run_index: usize,
) -> Option<DiffInfo> {
    if expected.shape() != actual.shape() {
        return Some(DiffInfo {
            index: None,
            expected: f64::NAN,
            actual: f64::NAN,
            run_index,
        });
    }

    expected
        .iter()
        .zip(actual.iter())
        .position(|(a, b)| a.to_bits() != b.to_bits())
        .map(|index| DiffInfo {
            index: Some(index),
            expected: expected.iter().nth(index).copied().unwrap_or(f64::NAN),
            actual: actual.iter().nth(index).copied().unwrap_or(f64::NAN),
            run_index,
        })
}

/// Run generation `runs` times (at least 2) and verify all outputs are
/// bit-identical.
pub fn verify_determinism<F>(mut generate_fn: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> ArrayD<f64>,
{
    let runs = runs.max(2);
    let first = generate_fn();
    let shape = first.shape().to_vec();
    let hash = samples_hash(first.iter());

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = first_difference(&first, &output, run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs: run_index + 1,
                shape,
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        shape,
        hash,
        diff_info: None,
    }
}

/// Generates a `#[test]` that checks an expression yields bit-identical
/// noise across runs.
///
/// ```rust,ignore
/// test_determinism!(brown_batch, {
///     PowerLawNoise::brown().generate([4, 128], &mut create_rng(3)).unwrap()
/// });
///
/// test_determinism!(brown_batch_five, runs = 5, { ... });
/// ```
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, runs = $runs:expr, $generate:expr) => {
        #[test]
        fn $name() {
            $crate::determinism::verify_determinism(|| $generate, $runs).assert_deterministic();
        }
    };

    ($name:ident, $generate:expr) => {
        $crate::test_determinism!($name, runs = 3, $generate);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_identical_runs() {
        let result = verify_determinism(|| ArrayD::from_elem(IxDyn(&[2, 4]), 0.5), 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.shape, vec![2, 4]);
        result.assert_deterministic();
    }

    #[test]
    fn test_detects_changed_sample() {
        let mut calls = 0;
        let result = verify_determinism(
            || {
                calls += 1;
                let mut values = vec![0.0; 6];
                if calls == 3 {
                    values[4] = 1.0;
                }
                ArrayD::from_shape_vec(IxDyn(&[6]), values).unwrap()
            },
            4,
        );
        assert!(!result.is_deterministic);
        let diff = result.diff_info.unwrap();
        assert_eq!(diff.index, Some(4));
        assert_eq!(diff.run_index, 2);
        assert_eq!(diff.actual, 1.0);
    }

    #[test]
    fn test_signed_zero_counts_as_difference() {
        let a = ArrayD::from_elem(IxDyn(&[1]), 0.0);
        let b = ArrayD::from_elem(IxDyn(&[1]), -0.0);
        assert!(first_difference(&a, &b, 1).is_some());
    }

    #[test]
    fn test_shape_mismatch() {
        let a = ArrayD::<f64>::zeros(IxDyn(&[4]));
        let b = ArrayD::<f64>::zeros(IxDyn(&[2, 2]));
        assert_eq!(first_difference(&a, &b, 1).unwrap().index, None);
    }

    #[test]
    #[should_panic(expected = "Non-deterministic")]
    fn test_assert_panics_on_difference() {
        let mut seed = 0.0;
        verify_determinism(
            || {
                seed += 1.0;
                ArrayD::from_elem(IxDyn(&[2]), seed)
            },
            2,
        )
        .assert_deterministic();
    }
}
