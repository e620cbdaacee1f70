//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `generate` and `analyze`.

use colornoise::analysis::{SampleStats, SpectralFit};
use colornoise::NoiseError;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Library failures pass through their own `NOISE_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension or format
    pub const UNSUPPORTED_FORMAT: &str = "CLI_002";
    /// Invalid combination of arguments
    pub const INVALID_ARGS: &str = "CLI_003";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_004";
    /// Input could not be parsed or analyzed
    pub const ANALYSIS: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "NOISE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Converts an error chain, keeping the library code when the root cause
    /// is a [`NoiseError`].
    pub fn from_anyhow(err: &anyhow::Error, fallback_code: &str) -> Self {
        let code = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<NoiseError>())
            .map(|e| e.code())
            .unwrap_or(fallback_code);
        Self::new(code, format!("{:#}", err))
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered during generation
    pub errors: Vec<JsonError>,
    /// Generation details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
}

impl GenerateOutput {
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Parameters and files of a generate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Output dimensions, time axis last
    pub shape: Vec<usize>,
    /// Spectral exponent β
    pub exponent: f64,
    /// Low-frequency cutoff
    pub fmin: f64,
    /// Base seed
    pub seed: u32,
    /// Every output written
    pub outputs: Vec<GeneratedOutput>,
}

/// One generated array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedOutput {
    /// Variation index, absent for the primary output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<u32>,
    /// Output format (json, csv, wav)
    pub format: String,
    /// Output path, absent when written to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// BLAKE3 hash of the samples
    pub hash: String,
}

/// Output of `analyze --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOutput {
    /// Whether analysis succeeded
    pub success: bool,
    /// Errors encountered during analysis
    pub errors: Vec<JsonError>,
    /// Analysis details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalyzeResult>,
}

impl AnalyzeOutput {
    pub fn success(result: AnalyzeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Per-file analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// Input file path
    pub input: String,
    /// Detected format
    pub format: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// Dimensions of the data read, time axis last
    pub shape: Vec<usize>,
    /// One entry per realization
    pub realizations: Vec<RealizationReport>,
}

/// Statistics of one realization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealizationReport {
    /// Row index of the realization
    pub index: usize,
    /// Sample moments
    #[serde(flatten)]
    pub stats: SampleStats,
    /// Power-law fit of the periodogram, absent when too short to fit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_fit: Option<SpectralFit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new("CLI_001", "test error").with_file("noise.json");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"CLI_001\""));
        assert!(json.contains("\"file\":\"noise.json\""));

        let bare = serde_json::to_string(&JsonError::new("CLI_002", "x")).unwrap();
        assert!(!bare.contains("file"));
    }

    #[test]
    fn test_from_anyhow_keeps_library_code() {
        let err: anyhow::Result<()> =
            Err(NoiseError::invalid_param("fmin", "too large")).context("Invalid spec");
        let json = JsonError::from_anyhow(&err.unwrap_err(), error_codes::INVALID_ARGS);
        assert_eq!(json.code, "NOISE_002");
        assert!(json.message.contains("Invalid spec"));
        assert!(json.message.contains("too large"));
    }

    #[test]
    fn test_from_anyhow_fallback() {
        let err = anyhow::anyhow!("plain failure");
        let json = JsonError::from_anyhow(&err, error_codes::FILE_WRITE);
        assert_eq!(json.code, "CLI_004");
    }

    #[test]
    fn test_failure_output_omits_result() {
        let output = GenerateOutput::failure(vec![JsonError::new("CLI_003", "bad")]);
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("\"result\""));
    }
}
