//! digisig CLI: evaluate discrete-time signal workspaces.
//!
//! This is the main entry point for the signal workspace tool.

mod config;
mod evaluate;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lib_signal::{ShiftRegister, Signal};
use lib_types::{Complex64, Sample, SampleKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "digisig")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a signal workspace
    Eval {
        /// Path to the workspace configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a bipolar shift-register sequence
    Prbs {
        /// Register length
        #[arg(short, long, default_value = "4")]
        taps: usize,

        /// Number of samples to generate
        #[arg(short, long, default_value = "15")]
        length: usize,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Eval { config, output } => {
            run_workspace(&config, output.as_deref(), cli.format)?;
        }
        Commands::Prbs { taps, length, output } => {
            generate_prbs(taps, length, output.as_deref(), cli.format)?;
        }
    }

    Ok(())
}

fn run_workspace(config_path: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading workspace from {:?}", config_path);

    let config = config::load_config(config_path)?;

    match config.kind {
        SampleKind::Real => {
            let results = evaluate::evaluate::<f64>(&config)?;
            emit(&results, output, format)
        }
        SampleKind::Complex => {
            let results = evaluate::evaluate::<Complex64>(&config)?;
            emit(&results, output, format)
        }
    }
}

fn generate_prbs(taps: usize, length: usize, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    tracing::info!("Generating {} samples from a {}-cell shift register", length, taps);

    let register = ShiftRegister::new(taps)?;
    let sequence = register.generate(length);

    emit(&[("prbs".to_string(), sequence)], output, format)
}

fn emit<T: Sample>(results: &[(String, Signal<T>)], output: Option<&Path>, format: OutputFormat) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            output::write_results(results, format, std::io::BufWriter::new(file))?;
            tracing::info!("Wrote {} signals to {:?}", results.len(), path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            output::write_results(results, format, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
