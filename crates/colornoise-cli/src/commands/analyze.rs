//! Analyze command implementation
//!
//! Reads generated noise (JSON document, CSV or WAV) and reports per-realization
//! moments and the fitted spectral exponent.

use anyhow::{Context, Result};
use colored::Colorize;
use colornoise::analysis::{fit_power_law, sample_stats};
use log::debug;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, AnalyzeOutput, AnalyzeResult, JsonError, RealizationReport};
use crate::output::{read_signal, OutputFormat, Signal};

/// Run the analyze command
///
/// # Arguments
/// * `input_path` - Path to a `.json`, `.csv` or `.wav` file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input_path: &Path, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input_path)
    } else {
        run_human(input_path)
    }
}

/// Run analyze with human-readable (colored) output
fn run_human(input_path: &Path) -> Result<ExitCode> {
    println!("{} {}", "Analyzing:".cyan().bold(), input_path.display());

    let result = analyze_file(input_path)?;

    println!("{} {}", "Format:".dimmed(), result.format);
    println!("{} {}", "Hash:".dimmed(), &result.input_hash[..16]);
    println!(
        "{} {}",
        "Shape:".dimmed(),
        result
            .shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x")
    );
    println!();

    for report in &result.realizations {
        let stats = &report.stats;
        let fit = match &report.spectral_fit {
            Some(fit) => format!("beta={:.3} (r2={:.3})", fit.exponent(), fit.r_squared),
            None => "beta=n/a".dimmed().to_string(),
        };
        println!(
            "  {} mean={:+.4} var={:.4} min={:+.3} max={:+.3} {}",
            format!("#{}", report.index).bold(),
            stats.mean,
            stats.variance,
            stats.min,
            stats.max,
            fit
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Run analyze with machine-readable JSON output
fn run_json(input_path: &Path) -> Result<ExitCode> {
    let output = match analyze_file(input_path) {
        Ok(result) => AnalyzeOutput::success(result),
        Err(e) => {
            let code = if OutputFormat::from_path(input_path).is_none() {
                error_codes::UNSUPPORTED_FORMAT
            } else if !input_path.is_file() {
                error_codes::FILE_READ
            } else {
                error_codes::ANALYSIS
            };
            let error =
                JsonError::new(code, format!("{:#}", e)).with_file(input_path.display().to_string());
            AnalyzeOutput::failure(vec![error])
        }
    };

    let success = output.success;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Reads `input_path` and analyzes every realization in it.
pub fn analyze_file(input_path: &Path) -> Result<AnalyzeResult> {
    let format = OutputFormat::from_path(input_path).ok_or_else(|| {
        anyhow::anyhow!(
            "Unsupported file format. Expected .json, .csv or .wav, got: {}",
            input_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
        )
    })?;

    let bytes = fs::read(input_path)
        .with_context(|| format!("Failed to read file: {}", input_path.display()))?;
    let input_hash = blake3::hash(&bytes).to_hex().to_string();

    let signal = read_signal(format, &bytes)
        .with_context(|| format!("Failed to parse {} file: {}", format, input_path.display()))?;
    debug!("read {:?} samples from {}", signal.shape, input_path.display());

    Ok(AnalyzeResult {
        input: input_path.display().to_string(),
        format: format.to_string(),
        input_hash,
        shape: signal.shape.clone(),
        realizations: analyze_signal(&signal),
    })
}

/// Moments and spectral fit for each realization of `signal`.
pub fn analyze_signal(signal: &Signal) -> Vec<RealizationReport> {
    signal
        .realizations()
        .enumerate()
        .filter_map(|(index, values)| {
            let stats = sample_stats(values)?;
            Some(RealizationReport {
                index,
                stats,
                spectral_fit: fit_power_law(values).ok(),
            })
        })
        .collect()
}
