// Settings resolution: config file, then environment / flags on top.

use std::path::{Path, PathBuf};

use clap::Args;
use pricelens_catalog::config::IngestSettings;
use pricelens_catalog::{NumberPolicy, Settings};

use crate::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub(crate) const LOCAL_CONFIG: &str = "pricelens.toml";

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct GlobalArgs {
    /// Directory to scan for price lists [default: current directory]
    #[arg(long, short = 'd', global = true, env = "PRICELENS_DIR")]
    pub dir: Option<PathBuf>,

    /// Config file [default: ./pricelens.toml, then the user config directory]
    #[arg(long, short = 'c', global = true, env = "PRICELENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTML report path [default: output.html]
    #[arg(long, short = 'o', global = true, env = "PRICELENS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Accept whole numbers only in price and weight columns
    #[arg(long, global = true)]
    pub whole_numbers: bool,

    /// Do not print ingestion diagnostics (they are still logged)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Everything a command needs, after merging config and flags.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub config_path: Option<PathBuf>,
    pub directory: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub ingest: IngestSettings,
}

/// Explicit path wins; otherwise the first existing default location.
fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("pricelens").join("config.toml"))
        .filter(|path| path.is_file())
}

pub(crate) fn load_settings(path: &Path) -> Result<Settings, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read config {}: {e}", path.display())))?;
    Settings::from_toml(&text).map_err(|e| {
        CliError::config(format!("{}: {e}", path.display()))
            .with_hint("known sections are [source], [numbers], [vocabulary] and [report]")
    })
}

pub(crate) fn resolve(args: &GlobalArgs) -> Result<Resolved, CliError> {
    let config_path = discover(args.config.as_deref());
    let mut settings = match &config_path {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    if args.whole_numbers {
        settings.numbers.policy = NumberPolicy::Whole;
    }

    let ingest = settings
        .ingest_settings()
        .map_err(|e| CliError::config(e.to_string()))?;

    tracing::debug!(
        config = ?config_path,
        policy = %ingest.policy,
        "settings resolved"
    );

    Ok(Resolved {
        directory: args
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.source.directory)),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&settings.report.output)),
        title: settings.report.title.clone(),
        config_path,
        ingest,
    })
}
