//! JSON document output.

use anyhow::{Context, Result};
use colornoise::{samples_hash, NoiseSpec};
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::Signal;

/// Self-describing JSON form of one generated array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseDocument {
    /// Dimensions, time axis last.
    pub shape: Vec<usize>,
    /// Spectral exponent β.
    pub exponent: f64,
    /// Low-frequency cutoff.
    pub fmin: f64,
    /// Base seed.
    pub seed: u32,
    /// Variation index, absent for the primary output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<u32>,
    /// BLAKE3 hash of the samples.
    pub hash: String,
    /// Samples in row-major order.
    pub data: Vec<f64>,
}

impl NoiseDocument {
    /// Builds a document for `noise` generated from `spec`.
    pub fn new(spec: &NoiseSpec, variation: Option<u32>, noise: &ArrayD<f64>) -> Self {
        Self {
            shape: noise.shape().to_vec(),
            exponent: spec.exponent.value(),
            fmin: spec.fmin,
            seed: spec.seed,
            variation,
            hash: samples_hash(noise.iter()),
            data: noise.iter().copied().collect(),
        }
    }

    /// Writes the document as pretty-printed JSON followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)
            .context("Failed to serialize noise document")?;
        writeln!(writer)?;
        Ok(())
    }

    /// Parses a document and checks that `data` matches `shape`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let doc: NoiseDocument =
            serde_json::from_slice(bytes).context("Failed to parse noise document")?;
        let expected: usize = doc.shape.iter().product();
        if doc.shape.is_empty() || expected != doc.data.len() {
            anyhow::bail!(
                "noise document shape {:?} does not match {} data values",
                doc.shape,
                doc.data.len()
            );
        }
        Ok(doc)
    }

    /// Drops the metadata.
    pub fn into_signal(self) -> Signal {
        Signal {
            shape: self.shape,
            data: self.data,
        }
    }
}
