//! Implementation of the fxql-check command.

use crate::report;
use crate::service::ServiceConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fxql_core::{is_currency_code, CurrencyWhitelist, FxqlEntry};
use fxql_parser::{parse_batch_with, BatchResult, ParseOptions};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// A failed statement in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonFailure {
    /// The normalized statement text
    pub input: String,
    /// Error message
    pub error: String,
    /// Error code (e.g., "F0005")
    pub code: String,
    /// Line number within `input` (1-based)
    pub line: Option<usize>,
    /// Column number within `input` (1-based)
    pub column: Option<usize>,
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Entries for every statement that parsed
    pub statements: Vec<FxqlEntry>,
    /// Every statement that failed
    pub failures: Vec<JsonFailure>,
}

impl From<&BatchResult> for JsonOutput {
    fn from(result: &BatchResult) -> Self {
        Self {
            statements: result.statements.iter().map(FxqlEntry::from).collect(),
            failures: result
                .failures
                .iter()
                .map(|failure| JsonFailure {
                    input: failure.source_text.clone(),
                    error: failure.message(),
                    code: failure.error.code(),
                    line: failure.line(),
                    column: failure.column(),
                })
                .collect(),
        }
    }
}

/// Validate FXQL statements and report failures.
#[derive(Parser, Debug)]
#[command(name = "fxql-check", author, version, about, long_about = None)]
pub struct Args {
    /// The FXQL file to check (reads standard input when omitted or `-`)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Allowed currency code (can be specified multiple times; replaces the default list)
    #[arg(long = "currency", value_name = "CODE")]
    pub currencies: Vec<String>,

    /// Maximum number of statements accepted
    #[arg(long, value_name = "N")]
    pub max_statements: Option<usize>,

    /// Show verbose output including timing information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output in every format (just use exit code)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Build the service configuration these flags describe.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::default();
        if !self.currencies.is_empty() {
            if let Some(bad) = self.currencies.iter().find(|c| !is_currency_code(c)) {
                anyhow::bail!(
                    "invalid currency code '{bad}': must be exactly 3 uppercase letters"
                );
            }
            let whitelist: CurrencyWhitelist = self.currencies.iter().cloned().collect();
            config = config.with_parse_options(ParseOptions::new().with_currencies(whitelist));
        }
        if let Some(max) = self.max_statements {
            config = config.with_max_statements(max);
        }
        Ok(config)
    }
}

/// Read the input named on the command line, returning its display name and text.
fn read_input(file: Option<&Path>) -> Result<(String, String)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        _ => {
            let text = io::read_to_string(io::stdin()).context("failed to read standard input")?;
            Ok(("<stdin>".to_string(), text))
        }
    }
}

/// Check `source` and write the results to `writer`.
///
/// Returns `true` when every statement parsed.
pub fn check_source<W: Write>(
    args: &Args,
    source_name: &str,
    source: &str,
    color: bool,
    writer: &mut W,
) -> Result<bool> {
    let start = Instant::now();
    let config = args.service_config()?;

    let result = parse_batch_with(source, &config.parse);
    if result.len() > config.max_statements {
        anyhow::bail!(
            "{source_name} holds {} statements; the limit is {}",
            result.len(),
            config.max_statements
        );
    }
    tracing::debug!(
        "Checked {} statement(s) from {source_name}: {} failed",
        result.len(),
        result.failures.len()
    );

    if args.quiet {
        return Ok(result.is_ok());
    }

    match args.format {
        OutputFormat::Json => {
            let output = JsonOutput::from(&result);
            writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        }
        OutputFormat::Text => {
            report::report_failures(&result.failures, source_name, color, writer)?;
            if args.verbose {
                writeln!(
                    writer,
                    "\nChecked in {:.2}ms",
                    start.elapsed().as_secs_f64() * 1000.0
                )?;
            }
            report::print_summary(
                result.statements.len(),
                result.failures.len(),
                color,
                writer,
            )?;
        }
    }

    Ok(result.is_ok())
}

fn run(args: &Args) -> Result<ExitCode> {
    let (source_name, source) = read_input(args.file.as_deref())?;
    let mut stdout = io::stdout().lock();
    let color = stdout.is_terminal();
    if check_source(args, &source_name, &source, color, &mut stdout)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Main entry point for the check command.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stderr)
            .init();
    }

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
