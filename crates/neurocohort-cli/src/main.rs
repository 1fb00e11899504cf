mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use neurocohort_eval::{render_summary, summarize};
use neurocohort_generate::{GenerateOptions, GenerationEngine, GenerationError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "neurocohort",
    version,
    about = "Synthetic neurological admission cohort generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the cohort CSV with the built-in model.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output path for the cohort CSV.
    #[arg(long, default_value = "cohort.csv")]
    out: PathBuf,
    /// Optional output path for the JSON run report.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Append JSON log lines to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        out,
        report,
        log_file,
    } = args;

    logging::init_logging(log_file.as_deref())?;

    let options = GenerateOptions {
        out_path: out,
        report_path: report,
        ..GenerateOptions::default()
    };

    println!(
        "Generating {} synthetic neurological admissions...",
        options.rows
    );
    info!(
        out = %options.out_path.display(),
        report = ?options.report_path,
        "cli generate"
    );
    let result = GenerationEngine::new(options).run()?;
    info!(
        out = %result.out_path.display(),
        bytes_written = result.report.bytes_written,
        "cohort exported"
    );

    let summary = summarize(&result.table);
    println!();
    println!(
        "{}",
        render_summary(&summary, &result.out_path.display().to_string())
    );
    if let Some(path) = &result.report_path {
        println!();
        println!("Report: {}", path.display());
    }
    Ok(())
}
