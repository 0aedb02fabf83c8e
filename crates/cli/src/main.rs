// PriceLens CLI - search product prices across CSV price lists

mod exit_codes;
mod html;
mod repl;
mod settings;
mod sink;
mod table;
mod util;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricelens_catalog::{build_with_report, search, Catalog, IngestReport, PriceRecord};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_SUCCESS};
use repl::{export_error_message, Export, ExportStatus};
use settings::{GlobalArgs, Resolved};
use sink::ConsoleSink;

#[derive(Parser)]
#[command(name = "pricelens")]
#[command(about = "Search product prices across CSV price lists")]
#[command(version)]
#[command(subcommand_required = false)]
#[command(after_help = "\
Without a subcommand the price lists are loaded once and an interactive
search prompt is started. Type \"exit\" or press Ctrl-D to quit.

Logging goes to stderr and is controlled by RUST_LOG (e.g. RUST_LOG=debug).")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once, print the matches and write the HTML report
    #[command(after_help = "\
Examples:
  pricelens search яблоко
  pricelens search 'сыр' --dir ./lists --output cheese.html
  pricelens search сыр --json --no-export | jq '.[0]'")]
    Search {
        /// Part of a product name (case-insensitive)
        fragment: String,

        /// Print matches as a JSON array instead of a table
        #[arg(long)]
        json: bool,

        /// Do not write the HTML report
        #[arg(long)]
        no_export: bool,
    },

    /// Load the price lists and report what was ingested
    #[command(after_help = "\
Examples:
  pricelens scan
  pricelens scan --dir ./lists --json")]
    Scan {
        /// Print the ingest report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    // RUST_LOG unset means errors only; console diagnostics are printed separately.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_interactive(&cli.global),
        Some(Commands::Search { fragment, json, no_export }) => {
            cmd_search(&cli.global, &fragment, json, no_export)
        }
        Some(Commands::Scan { json }) => cmd_scan(&cli.global, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// loading
// ============================================================================

fn summary_line(catalog: &Catalog, report: &IngestReport) -> String {
    format!(
        "loaded {} records from {} files ({} rows skipped, {} files skipped)",
        catalog.len(),
        report.files_ingested,
        report.rows_skipped,
        report.files_skipped,
    )
}

/// Ingest the configured directory. Diagnostics and the summary go to stderr.
fn load(resolved: &Resolved, quiet: bool) -> (Catalog, IngestReport) {
    let stderr = io::stderr();
    let mut sink = ConsoleSink::new(stderr.lock(), quiet);
    let (catalog, report) = build_with_report(&resolved.directory, &resolved.ingest, &mut sink);

    tracing::info!(
        dir = %resolved.directory.display(),
        records = catalog.len(),
        files_ingested = report.files_ingested,
        files_skipped = report.files_skipped,
        rows_skipped = report.rows_skipped,
        warnings = sink.warnings,
        "catalog loaded"
    );
    (catalog, report)
}

fn export_for(resolved: &Resolved, enabled: bool) -> Export<'_> {
    Export {
        path: enabled.then_some(resolved.output.as_path()),
        title: &resolved.title,
    }
}

// ============================================================================
// interactive
// ============================================================================

fn cmd_interactive(global: &GlobalArgs) -> Result<(), CliError> {
    let resolved = settings::resolve(global)?;
    let (catalog, report) = load(&resolved, global.quiet);
    if !global.quiet {
        eprintln!("{}", summary_line(&catalog, &report));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    repl::run(
        &catalog,
        export_for(&resolved, true),
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
    .map_err(|e| CliError::io(format!("terminal: {e}")))
}

// ============================================================================
// search
// ============================================================================

fn cmd_search(global: &GlobalArgs, fragment: &str, json: bool, no_export: bool) -> Result<(), CliError> {
    let resolved = settings::resolve(global)?;
    let (catalog, report) = load(&resolved, global.quiet);
    if !global.quiet {
        eprintln!("{}", summary_line(&catalog, &report));
    }

    let export = export_for(&resolved, !no_export);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let status = if json {
        let records: Vec<&PriceRecord> = search(&catalog, fragment).records().to_vec();
        let text = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::io(format!("cannot serialize results: {e}")))?;
        writeln!(out, "{text}").map_err(|e| CliError::io(e.to_string()))?;

        match export.path {
            Some(path) if !records.is_empty() => {
                match html::write_report(path, &records, export.title) {
                    Ok(()) => ExportStatus::Written,
                    Err(e) => ExportStatus::Failed(e),
                }
            }
            _ => ExportStatus::Skipped,
        }
    } else {
        repl::run_query(&catalog, fragment, export, &mut out)
            .map_err(|e| CliError::io(e.to_string()))?
    };

    match status {
        ExportStatus::Failed(e) => Err(CliError::io(export_error_message(export, &e))
            .with_hint("use --output to choose another path, or --no-export")),
        ExportStatus::Written | ExportStatus::Skipped => Ok(()),
    }
}

// ============================================================================
// scan
// ============================================================================

#[derive(Serialize)]
struct ScanSummary<'a> {
    directory: String,
    config: Option<String>,
    policy: String,
    records: usize,
    sources: Vec<&'a str>,
    report: &'a IngestReport,
}

fn cmd_scan(global: &GlobalArgs, json: bool) -> Result<(), CliError> {
    let resolved = settings::resolve(global)?;
    let (catalog, report) = load(&resolved, global.quiet);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let value = ScanSummary {
            directory: resolved.directory.display().to_string(),
            config: resolved.config_path.as_ref().map(|p| p.display().to_string()),
            policy: resolved.ingest.policy.to_string(),
            records: catalog.len(),
            sources: catalog.sources(),
            report: &report,
        };
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::io(format!("cannot serialize report: {e}")))?;
        writeln!(out, "{text}").map_err(|e| CliError::io(e.to_string()))?;
        return Ok(());
    }

    let mut lines = vec![summary_line(&catalog, &report)];
    lines.push(format!("files considered: {}", report.files_considered));
    lines.push(format!("rows accepted:    {}", report.rows_accepted));
    for source in catalog.sources() {
        lines.push(format!("  {source}"));
    }
    for line in lines {
        writeln!(out, "{line}").map_err(|e| CliError::io(e.to_string()))?;
    }
    Ok(())
}
