//! colornoise CLI - Command-line interface for power-law noise generation
//!
//! This binary generates colored Gaussian noise from flags or a JSON spec
//! file and analyzes previously generated output.

use clap::{ArgAction, Parser, Subcommand};
use colornoise::{NoiseColor, Shape};
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use colornoise_cli::commands;
use colornoise_cli::commands::generate::GenerateOptions;
use colornoise_cli::logging::init_logging;
use colornoise_cli::output::OutputFormat;

/// colornoise - Power-law (colored) Gaussian noise
#[derive(Parser)]
#[command(name = "colornoise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate noise with a power-law spectrum
    Generate {
        /// Path to a JSON noise spec; flags override its values
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Spectral exponent beta (0 white, 1 pink, 2 brown)
        #[arg(short, long, allow_negative_numbers = true, conflicts_with = "color")]
        exponent: Option<f64>,

        /// Named color (white, pink, brown, blue, violet)
        #[arg(short, long)]
        color: Option<NoiseColor>,

        /// Output shape, time axis last (e.g. 1024, 4x1024)
        #[arg(long)]
        shape: Option<Shape>,

        /// Low-frequency cutoff in cycles per sample (0 to 0.5)
        #[arg(long)]
        fmin: Option<f64>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u32>,

        /// Also write N seeded variations next to the output
        #[arg(long, default_value_t = 0)]
        variations: u32,

        /// Output format (default: from the output extension, else json)
        #[arg(short, long, value_parser = ["json", "csv", "wav"])]
        format: Option<String>,

        /// Sample rate for WAV output
        #[arg(long, default_value_t = colornoise_cli::output::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output a machine-readable JSON summary (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Analyze generated noise and report moments and spectral slope
    Analyze {
        /// Path to the input file (.json, .csv or .wav)
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            spec,
            exponent,
            color,
            shape,
            fmin,
            seed,
            variations,
            format,
            sample_rate,
            output,
            json,
        } => {
            let format = format
                .map(|f| f.parse::<OutputFormat>())
                .transpose()
                .map_err(anyhow::Error::msg);
            format.and_then(|format| {
                commands::generate::run(&GenerateOptions {
                    spec,
                    exponent,
                    color,
                    shape,
                    fmin,
                    seed,
                    variations,
                    format,
                    sample_rate,
                    output,
                    json,
                })
            })
        }
        Commands::Analyze { input, json } => commands::analyze::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
