use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fixturegen::{run, GeneratorConfig};
use indicatif::HumanBytes;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fixturegen",
    about = "Generate directories of random files named by their SHA-256 digest"
)]
struct Cli {
    /// Verbose mode, logs every generated file
    #[arg(short, long)]
    verbose: bool,

    /// Number of files to generate per case (defaults to each case's own count)
    #[arg(long = "num-of-files")]
    num_of_files: Option<u64>,

    /// Root directory in which all generated files are stored
    #[arg(long, default_value = "/tmp")]
    root_dir: PathBuf,

    /// Only run the named case; may be repeated
    #[arg(long = "case")]
    cases: Vec<String>,

    /// Stop before the first case with gigabyte-scale files
    #[arg(long)]
    stop_before_large: bool,

    /// Never draw progress bars
    #[arg(long)]
    no_progress: bool,

    /// Print the case table and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(cli.clone())?;

    if cli.list {
        for (idx, case) in config.effective_cases().iter().enumerate() {
            let marker = if config.is_large(case) { " (large)" } else { "" };
            println!("Case {}: {} -> {}{}", idx + 1, case, case.name, marker);
        }
        return Ok(());
    }

    let report = run(&config)
        .with_context(|| format!("fixture generation under {} failed", config.root_dir.display()))?;

    println!(
        "Generated {} files ({}) in {} case(s) under {}",
        report.file_count(),
        HumanBytes(report.total_bytes()),
        report.cases.len(),
        config.root_dir.display()
    );
    if report.duplicate_count() > 0 {
        println!(
            "Dropped {} payload(s) whose digest was already on disk",
            report.duplicate_count()
        );
    }
    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.name, skipped);
    }
    Ok(())
}

/// Verbose runs never draw a progress bar
fn build_config(cli: Cli) -> Result<GeneratorConfig> {
    GeneratorConfig {
        root_dir: cli.root_dir,
        file_count_override: cli.num_of_files,
        stop_before_large: cli.stop_before_large,
        progress: !cli.no_progress && !cli.verbose,
        ..GeneratorConfig::default()
    }
    .only_cases(&cli.cases)
    .context("invalid --case selection")
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
