//! WAV output: 32-bit float, one channel per realization.

use anyhow::{Context, Result};
use ndarray::ArrayD;
use std::io::Cursor;
use std::path::Path;

use super::Signal;

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Writes `noise` to `path` as a float WAV file.
///
/// A 1-D array becomes a mono file; for a 2-D array each row becomes a
/// channel. The whole file is scaled by one factor so that the largest
/// absolute sample is 1.0, which keeps the relative levels of channels.
pub fn write_wav(path: &Path, noise: &ArrayD<f64>, sample_rate: u32) -> Result<()> {
    let (channels, frames) = match noise.shape() {
        [frames] => (1, *frames),
        [channels, frames] => (*channels, *frames),
        dims => anyhow::bail!(
            "WAV output supports at most 2 dimensions (channels x samples), got {:?}",
            dims
        ),
    };
    let channel_count = u16::try_from(channels)
        .with_context(|| format!("{} realizations exceed the WAV channel limit", channels))?;
    if sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }

    let peak = noise.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let gain = if peak > 0.0 { 1.0 / peak } else { 1.0 };

    let spec = hound::WavSpec {
        channels: channel_count,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    let values: Vec<f64> = noise.iter().copied().collect();
    for frame in 0..frames {
        for channel in 0..channels {
            let sample = values[channel * frames + frame] * gain;
            writer.write_sample(sample as f32)?;
        }
    }
    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}

/// Reads WAV data into channel-major realizations.
///
/// Integer PCM is scaled to `[-1, 1)`. A mono file has shape `[frames]`,
/// otherwise `[channels, frames]`.
pub fn read_wav(bytes: &[u8]) -> Result<Signal> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("Failed to parse WAV data")?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f64 / max_val))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
    };

    if channels == 0 {
        anyhow::bail!("WAV data has no channels");
    }
    let frames = interleaved.len() / channels;

    let mut data = vec![0.0; frames * channels];
    for (i, value) in interleaved.iter().take(frames * channels).enumerate() {
        let (frame, channel) = (i / channels, i % channels);
        data[channel * frames + frame] = *value;
    }

    let shape = if channels == 1 {
        vec![frames]
    } else {
        vec![channels, frames]
    };
    Ok(Signal { shape, data })
}
