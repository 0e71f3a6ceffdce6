//! hashtrail - Recursive file hashing and metadata inventory.
//!
//! Usage:
//!   hashtrail -d <ROOT> -r <REPORT_DIR> --sha256      Hash a tree with SHA-256
//!   hashtrail -d <ROOT> -r <REPORT_DIR> --md5 -v      Hash with MD5, show progress
//!   hashtrail --help                                  Show help

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use clap::{ArgGroup, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use hashtrail_core::{DigestAlgorithm, RunConfig, WalkSummary};
use hashtrail_scan::{HashWalker, ScanProgress};

/// Log file written into the report directory unless `--log-file` is given.
const DEFAULT_LOG_NAME: &str = "hashtrail.log";

#[derive(Parser)]
#[command(
    name = "hashtrail",
    version,
    about = "Recursive file hashing and metadata inventory",
    long_about = "hashtrail walks a directory tree, hashes every regular file and \
                  writes one CSV row per file with its metadata and digest.\n\n\
                  The report and a diagnostic log are written to the report directory."
)]
#[command(group(
    ArgGroup::new("algorithm")
        .required(true)
        .args(["md5", "sha256", "sha512"])
))]
struct Cli {
    /// Root directory to hash
    #[arg(short = 'd', long = "root", value_name = "ROOT")]
    root: PathBuf,

    /// Directory receiving the report
    #[arg(short = 'r', long = "report-dir", value_name = "REPORT_DIR")]
    report_dir: PathBuf,

    /// Use MD5 (128-bit)
    #[arg(long)]
    md5: bool,

    /// Use SHA-256 (256-bit)
    #[arg(long)]
    sha256: bool,

    /// Use SHA-512 (512-bit)
    #[arg(long)]
    sha512: bool,

    /// Print a line for every hashed file and log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Log file (defaults to hashtrail.log in the report directory)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Summary output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

impl Cli {
    fn algorithm(&self) -> DigestAlgorithm {
        if self.md5 {
            DigestAlgorithm::Md5
        } else if self.sha512 {
            DigestAlgorithm::Sha512
        } else {
            DigestAlgorithm::Sha256
        }
    }

    fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.report_dir.join(DEFAULT_LOG_NAME))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = RunConfig::builder()
        .root(cli.root.clone())
        .report_dir(cli.report_dir.clone())
        .algorithm(cli.algorithm())
        .verbose(cli.verbose)
        .build()
        .map_err(hashtrail_core::ConfigError::from)
        .context("Invalid configuration")?;

    // Validation runs here, before the log or the report exist.
    let walker = HashWalker::new(config).context("Invalid configuration")?;

    let log_path = cli.log_path();
    setup_logging(cli.verbose, &log_path)?;
    let walker = walker.with_excluded(&log_path);

    info!("hashtrail v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Platform: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    let listener = cli.verbose.then(|| spawn_progress_listener(&walker));

    let summary = walker.walk().context("Scan failed")?;

    // Dropping the walker closes the progress channel.
    drop(walker);
    if let Some(handle) = listener {
        let _ = handle.join();
    }

    info!("Files processed: {}", summary.processed);
    info!("Files skipped: {}", summary.skipped);
    info!("Errors: {}", summary.errors);
    info!("Elapsed time: {:.2}s", summary.elapsed.as_secs_f64());
    info!("Scan finished");

    print_summary(&summary, cli.format)?;

    Ok(())
}

/// Install the global subscriber writing to `log_path`.
fn setup_logging(verbose: bool, log_path: &Path) -> Result<()> {
    let file = open_log_file(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))
}

/// Echo progress updates to stderr until the walker goes away.
fn spawn_progress_listener(walker: &HashWalker) -> thread::JoinHandle<()> {
    let mut rx = walker.subscribe();
    thread::spawn(move || {
        loop {
            match rx.blocking_recv() {
                Ok(progress) => eprintln!("{}", format_progress(&progress)),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn format_progress(progress: &ScanProgress) -> String {
    format!(
        "[{:>6}] {} ({}, {:.1} files/s, {}/s)",
        progress.files_processed,
        progress.current_path.display(),
        format_size(progress.bytes_hashed),
        progress.files_per_second(),
        format_size(progress.bytes_per_second() as u64)
    )
}

fn print_summary(summary: &WalkSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(" Report: {}", summary.report_path.display());
            println!(
                " {} files hashed ({}), {} skipped, {} errors",
                summary.processed,
                format_size(summary.bytes_hashed),
                summary.skipped,
                summary.errors
            );
            println!(" Finished in {:.2}s", summary.elapsed.as_secs_f64());
            if summary.cancelled {
                println!(" Walk was cancelled before completion");
            }
            println!("{}", "─".repeat(60));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }
    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
