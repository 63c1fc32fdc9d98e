//! likert-screen - screens a survey export and writes the accepted rows.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use likert_screen::adapters::{CsvResponseTable, FileReportWriter};
use likert_screen::application::{ScreenResponsesCommand, ScreenResponsesHandler};
use likert_screen::config::{AppConfig, LoggingConfig};
use likert_screen::domain::foundation::Timestamp;
use likert_screen::domain::screening::ScreeningEngine;
use likert_screen::ports::ReportWriter;

#[derive(Parser, Debug)]
#[command(name = "likert-screen", version)]
#[command(about = "Drop inattentive respondents from a Likert survey export")]
struct Args {
    /// Survey export to screen
    #[arg(long, value_name = "CSV")]
    input: PathBuf,

    /// Output file; defaults to a timestamped name in --output-dir
    #[arg(long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Directory for the timestamped output file
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Configuration file (TOML or YAML)
    #[arg(long, value_name = "FILE", env = "LIKERT_SCREEN_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides screening.allowed_failures
    #[arg(long)]
    allowed_failures: Option<u8>,

    /// Write the screening report as YAML
    #[arg(long, value_name = "YAML")]
    report: Option<PathBuf>,

    /// Evaluate and report without writing the output table
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_allowed_failures(args.allowed_failures);

    init_tracing(&config.logging);
    info!("Starting likert-screen v{}", env!("CARGO_PKG_VERSION"));

    let settings = config
        .screening_settings()
        .context("Invalid configuration")?;
    let engine = ScreeningEngine::new(settings).context("Invalid validation groups")?;

    let output = args
        .output
        .unwrap_or_else(|| CsvResponseTable::timestamped_path(&args.output_dir, &Timestamp::now()));
    let reader = CsvResponseTable::new(&args.input).with_options(config.table.csv_options());
    let writer = CsvResponseTable::new(&output);

    let handler = ScreenResponsesHandler::new(Arc::new(reader), Arc::new(writer), Arc::new(engine));
    let result = handler
        .handle(ScreenResponsesCommand {
            write_output: !args.dry_run,
        })
        .await
        .with_context(|| format!("Failed to screen {}", args.input.display()))?;

    if !args.dry_run {
        info!("Wrote {} rows to {}", result.written_rows, output.display());
    }

    if let Some(path) = &args.report {
        FileReportWriter::new(path)
            .write(&result.report)
            .await
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}
