//! Error types for noise generation.

use thiserror::Error;

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;

/// Errors that can occur while building or synthesizing a noise sequence.
#[derive(Debug, Error)]
pub enum NoiseError {
    /// Requested output shape is empty, non-positive, or not an integer.
    #[error("invalid shape: {message}")]
    InvalidShape {
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The inverse real FFT rejected the spectrum.
    #[error("inverse transform failed: {0}")]
    Transform(#[from] realfft::FftError),

    /// Noise spec could not be parsed.
    #[error("invalid noise spec: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NoiseError {
    /// Creates an invalid shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code, suitable for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            NoiseError::InvalidShape { .. } => "NOISE_001",
            NoiseError::InvalidParameter { .. } => "NOISE_002",
            NoiseError::Transform(_) => "NOISE_003",
            NoiseError::Json(_) => "NOISE_004",
            NoiseError::Io(_) => "NOISE_005",
        }
    }
}
