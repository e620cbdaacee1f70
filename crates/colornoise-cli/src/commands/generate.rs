//! Generate command implementation
//!
//! Builds a [`NoiseSpec`] from an optional spec file plus command-line
//! overrides, generates the noise and writes it in the requested format.

use anyhow::{Context, Result};
use colored::Colorize;
use colornoise::{samples_hash, NoiseColor, NoiseSpec, Shape};
use log::info;
use ndarray::ArrayD;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{error_codes, GenerateOutput, GenerateResult, GeneratedOutput, JsonError};
use crate::output::{write_csv, write_wav, NoiseDocument, OutputFormat, DEFAULT_SAMPLE_RATE};

/// Options for `colornoise generate`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Spec file providing defaults for every other option
    pub spec: Option<PathBuf>,
    /// Numeric spectral exponent
    pub exponent: Option<f64>,
    /// Named color, alternative to `exponent`
    pub color: Option<NoiseColor>,
    /// Output shape, time axis last
    pub shape: Option<Shape>,
    /// Low-frequency cutoff
    pub fmin: Option<f64>,
    /// RNG seed
    pub seed: Option<u32>,
    /// Number of additional seeded variations to write
    pub variations: u32,
    /// Output format; inferred from the output path when absent
    pub format: Option<OutputFormat>,
    /// WAV sample rate
    pub sample_rate: u32,
    /// Output path; stdout when absent
    pub output: Option<PathBuf>,
    /// Emit a machine-readable summary
    pub json: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            spec: None,
            exponent: None,
            color: None,
            shape: None,
            fmin: None,
            seed: None,
            variations: 0,
            format: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            output: None,
            json: false,
        }
    }
}

impl GenerateOptions {
    /// Loads the spec file (if any) and applies the command-line overrides.
    pub fn resolve_spec(&self) -> Result<NoiseSpec> {
        let mut spec = match (&self.spec, &self.shape) {
            (Some(path), _) => NoiseSpec::from_file(path)
                .with_context(|| format!("Failed to load spec file: {}", path.display()))?,
            (None, Some(shape)) => NoiseSpec::new(NoiseColor::Pink, shape),
            (None, None) => anyhow::bail!("either --spec or --shape is required"),
        };

        if let Some(shape) = &self.shape {
            spec.shape = shape.into();
        }
        if let Some(exponent) = self.exponent {
            spec.exponent = exponent.into();
        } else if let Some(color) = self.color {
            spec.exponent = color.into();
        }
        if let Some(fmin) = self.fmin {
            spec.fmin = fmin;
        }
        if let Some(seed) = self.seed {
            spec.seed = seed;
        }

        spec.validate().context("Invalid noise parameters")?;
        Ok(spec)
    }

    /// Explicit format, else the output extension, else JSON.
    pub fn resolve_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Json)
    }
}

/// Path for variation `index` next to `path`: `noise.wav` becomes
/// `noise_var3.wav`.
pub fn variation_path(path: &Path, index: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "noise".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}_var{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_var{}", stem, index),
    };
    path.with_file_name(name)
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &GenerateOptions) -> Result<ExitCode> {
    if options.json {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run generate with human-readable (colored) output on stderr, keeping
/// stdout free for the data.
fn run_human(options: &GenerateOptions) -> Result<ExitCode> {
    let spec = options.resolve_spec()?;
    let format = options.resolve_format();

    eprintln!(
        "{} {} noise, shape {}",
        "Generating:".cyan().bold(),
        spec.exponent,
        describe_shape(&spec)?
    );
    eprintln!(
        "{} fmin={} seed={}",
        "Parameters:".dimmed(),
        spec.fmin,
        spec.seed
    );

    let result = generate_outputs(options, &spec, format)?;

    for output in &result.outputs {
        let label = match output.variation {
            Some(index) => format!("variation {}", index),
            None => "primary".to_string(),
        };
        let target = output.path.as_deref().unwrap_or("<stdout>");
        eprintln!(
            "{} {} ({}) {} {}",
            "Wrote".green().bold(),
            target,
            label,
            "hash".dimmed(),
            &output.hash[..16]
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output
fn run_json(options: &GenerateOptions) -> Result<ExitCode> {
    if options.output.is_none() {
        let error = JsonError::new(
            error_codes::INVALID_ARGS,
            "--json needs --output; the JSON summary occupies stdout",
        );
        print_json(&GenerateOutput::failure(vec![error]))?;
        return Ok(ExitCode::from(1));
    }

    let outcome = options.resolve_spec().and_then(|spec| {
        let format = options.resolve_format();
        generate_outputs(options, &spec, format)
    });

    match outcome {
        Ok(result) => {
            print_json(&GenerateOutput::success(result))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let error = JsonError::from_anyhow(&e, error_codes::INVALID_ARGS);
            print_json(&GenerateOutput::failure(vec![error]))?;
            Ok(ExitCode::from(1))
        }
    }
}

/// Generates the primary output and every variation, writing each one.
pub fn generate_outputs(
    options: &GenerateOptions,
    spec: &NoiseSpec,
    format: OutputFormat,
) -> Result<GenerateResult> {
    if options.output.is_none() {
        if !format.supports_stdout() {
            anyhow::bail!("{} output needs --output", format);
        }
        if options.variations > 0 {
            anyhow::bail!("--variations needs --output");
        }
    }

    let shape = spec.validate()?;
    let mut outputs = Vec::with_capacity(options.variations as usize + 1);

    let noise = spec.generate()?;
    outputs.push(write_output(
        &noise,
        spec,
        None,
        format,
        options.output.as_deref(),
        options.sample_rate,
    )?);

    if let Some(base) = options.output.as_deref() {
        for index in 0..options.variations {
            let noise = spec.generate_variation(index)?;
            let path = variation_path(base, index);
            outputs.push(write_output(
                &noise,
                spec,
                Some(index),
                format,
                Some(&path),
                options.sample_rate,
            )?);
        }
    }

    Ok(GenerateResult {
        shape: shape.dims().to_vec(),
        exponent: spec.exponent.value(),
        fmin: spec.fmin,
        seed: spec.seed,
        outputs,
    })
}

fn write_output(
    noise: &ArrayD<f64>,
    spec: &NoiseSpec,
    variation: Option<u32>,
    format: OutputFormat,
    path: Option<&Path>,
    sample_rate: u32,
) -> Result<GeneratedOutput> {
    let hash = samples_hash(noise.iter());

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            match format {
                OutputFormat::Wav => write_wav(path, noise, sample_rate)?,
                _ => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create file: {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    write_text(noise, spec, variation, format, &mut writer)?;
                    writer
                        .flush()
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                }
            }
            info!("wrote {} to {}", format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_text(noise, spec, variation, format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(GeneratedOutput {
        variation,
        format: format.to_string(),
        path: path.map(|p| p.display().to_string()),
        hash,
    })
}

fn write_text<W: Write>(
    noise: &ArrayD<f64>,
    spec: &NoiseSpec,
    variation: Option<u32>,
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Json => NoiseDocument::new(spec, variation, noise).write_to(writer),
        OutputFormat::Csv => write_csv(noise, writer),
        OutputFormat::Wav => anyhow::bail!("WAV output cannot be streamed"),
    }
}

fn describe_shape(spec: &NoiseSpec) -> Result<String> {
    Ok(spec.shape.resolve()?.to_string())
}

fn print_json<T: serde::Serialize>(output: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    println!("{}", json);
    Ok(())
}
