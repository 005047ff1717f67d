//! pi-extract command-line interface.

mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pi_extract_core::loader::{NetworkLoader, TouchstoneLoader};
use pi_extract_core::report::Reporter;
use pi_extract_core::{extract, ExtractionConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use report::{CsvReporter, JsonReporter, TextReporter};

#[derive(Parser)]
#[command(name = "pi-extract")]
#[command(
    about = "Extract a simple inductor pi model from an S2P S-parameter file",
    long_about = None
)]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Input Touchstone file (.s2p)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Extraction frequency in GHz
    #[arg(value_name = "F_GHZ")]
    f_ghz: f64,

    /// Samples below this frequency are dropped when the sweep starts at DC
    #[arg(long, value_name = "GHZ", default_value_t = 1.0)]
    dc_floor_ghz: f64,

    /// Write the full differential and pi-model curves to a CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli, io::stdout().lock())
}

/// Log to stderr; RUST_LOG takes precedence over --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Load, extract and report to `out`; errors surface as a non-zero exit
fn run<W: Write>(cli: &Cli, mut out: W) -> Result<()> {
    let network = TouchstoneLoader
        .load(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    if !cli.json {
        writeln!(out, "Extract simple inductor pi model from S2P S-parameter file")?;
        writeln!(
            out,
            "S2P frequency range is {} to {} GHz",
            network.frequency().start() / 1e9,
            network.frequency().stop() / 1e9
        )?;
        writeln!(out, "Extraction frequency: {} GHz", cli.f_ghz)?;
    }

    let config = ExtractionConfig::default().with_dc_floor(cli.dc_floor_ghz * 1e9);
    debug!(?config, "extraction settings");
    let extraction = extract(&network, cli.f_ghz * 1e9, &config)
        .with_context(|| format!("extraction at {} GHz failed", cli.f_ghz))?;

    if cli.json {
        JsonReporter::new(&mut out)
            .report(&extraction)
            .context("failed to write JSON result")?;
    } else {
        TextReporter::new(&mut out)
            .report(&extraction)
            .context("failed to write report")?;
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        CsvReporter::new(BufWriter::new(file))
            .report(&extraction)
            .with_context(|| format!("failed to write curves to {}", path.display()))?;
        info!(path = %path.display(), rows = extraction.frequency().npoints(), "wrote curves");
    }

    Ok(())
}
