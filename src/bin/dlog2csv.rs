// src/bin/dlog2csv.rs
//! dlog2csv: convert binary data-logger files to CSV.
//!
//! ```bash
//! dlog2csv capture.dlog                       # writes capture.csv
//! dlog2csv capture.dlog -o out.csv --precision 6 --time
//! dlog2csv capture.dlog --info                # print the header only
//! ```
//!
//! Built with `cargo build --features cli`.
//!
//! The process exit code is the conversion status: 0 ok, 1 file error,
//! 2 invalid header.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use dlog_rs::{parse_header, ConvertOptions, ConvertStatus, DlogConverter, DlogError};

#[derive(Parser)]
#[command(name = "dlog2csv", version, about = "Convert dlog data-logger files to CSV")]
struct Cli {
    /// Input dlog file
    input: PathBuf,

    /// Output CSV file (defaults to the input path with a .csv extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Digits after the decimal point for sample values
    #[arg(short, long, default_value_t = ConvertOptions::DEFAULT_PRECISION)]
    precision: u8,

    /// Prefix each row with the sample time in seconds
    #[arg(long)]
    time: bool,

    /// Digits after the decimal point for the time column
    #[arg(long, default_value_t = ConvertOptions::DEFAULT_TIME_PRECISION)]
    time_precision: u8,

    /// Header row written before the data
    #[arg(long)]
    header: Option<String>,

    /// Samples per row, overriding the file's layout
    #[arg(long)]
    channels: Option<usize>,

    /// Print the parsed header and exit
    #[arg(long)]
    info: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = if cli.info { print_info(&cli.input) } else { convert(&cli) };

    match result {
        Ok(()) => ExitCode::from(ConvertStatus::Ok.code() as u8),
        Err(e) => {
            error!("{:#}", e);
            let status = e
                .downcast_ref::<DlogError>()
                .map(DlogError::status)
                .unwrap_or(ConvertStatus::FileOpenError);
            ExitCode::from(status.code() as u8)
        }
    }
}

fn convert(cli: &Cli) -> Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("csv"));

    let mut options = ConvertOptions::default().with_precision(cli.precision);
    if cli.time {
        options = options.with_time_column(cli.time_precision);
    }
    if let Some(header) = &cli.header {
        options = options.with_csv_header(header.clone());
    }
    if let Some(channels) = cli.channels {
        options = options.with_channels(channels);
    }

    let mut converter = DlogConverter::with_options(options)?;
    let summary = converter.convert_file(&cli.input, &output)?;

    info!(
        samples = summary.samples_written,
        rows = summary.rows_written,
        output = %output.display(),
        "Wrote CSV"
    );
    Ok(())
}

fn print_info(path: &Path) -> Result<()> {
    let mut file = File::open(path)
        .map_err(|e| DlogError::FileOpen { path: path.to_path_buf(), source: e })?;
    let header = parse_header(&mut file).with_context(|| format!("reading {}", path.display()))?;
    println!("{}", header);
    Ok(())
}
