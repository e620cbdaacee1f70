//! Output formats for generated noise.
//!
//! Every format can be written by `generate` and read back by `analyze`:
//! - `json`: a [`NoiseDocument`] carrying the shape, parameters and flat data
//! - `csv`: one realization per row
//! - `wav`: 32-bit float, one channel per realization, peak-normalized

mod csv;
mod document;
mod wav;

pub use self::csv::{read_csv, write_csv};
pub use document::NoiseDocument;
pub use wav::{read_wav, write_wav, DEFAULT_SAMPLE_RATE};

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File format for generated noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Wav,
}

impl OutputFormat {
    /// Every supported format.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Csv, OutputFormat::Wav];

    /// Lowercase name, also used as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Wav => "wav",
        }
    }

    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }

    /// Whether the format can be streamed to stdout.
    pub fn supports_stdout(&self) -> bool {
        !matches!(self, OutputFormat::Wav)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "wav" => Ok(OutputFormat::Wav),
            _ => Err(format!(
                "unknown format '{}'; expected one of: json, csv, wav",
                s
            )),
        }
    }
}

/// Noise read back from a file: dimensions (time axis last) and row-major
/// samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl Signal {
    /// Length of the time axis.
    pub fn samples(&self) -> usize {
        self.shape.last().copied().unwrap_or(0)
    }

    /// Each realization as a slice along the time axis.
    pub fn realizations(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.samples().max(1))
    }
}

/// Parses `bytes` as `format`.
pub fn read_signal(format: OutputFormat, bytes: &[u8]) -> Result<Signal> {
    match format {
        OutputFormat::Json => Ok(NoiseDocument::from_slice(bytes)?.into_signal()),
        OutputFormat::Csv => read_csv(bytes),
        OutputFormat::Wav => read_wav(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/noise.WAV")),
            Some(OutputFormat::Wav)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("noise.csv")),
            Some(OutputFormat::Csv)
        );
        assert_eq!(OutputFormat::from_path(Path::new("noise.png")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noise")), None);
    }

    #[test]
    fn test_format_parse_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>(), Ok(format));
        }
        assert!("flac".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_signal_realizations() {
        let signal = Signal {
            shape: vec![2, 3],
            data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        };
        let rows: Vec<&[f64]> = signal.realizations().collect();
        assert_eq!(rows, vec![&[1.0, 2.0, 3.0][..], &[4.0, 5.0, 6.0][..]]);
    }
}
