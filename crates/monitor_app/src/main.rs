mod config;
mod logging;
mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use monitor_core::SourceProfile;
use monitor_engine::{run_once, HtmlPage, SnapshotStore};
use monitor_logging::monitor_info;

/// Track manuscript review status across author dashboards.
///
/// Dashboard pages are captured by the external browser driver; this
/// binary harvests them, diffs against the stored snapshot and prints
/// the change report.
#[derive(Debug, Parser)]
#[command(name = "monitor_app", version, about)]
struct Cli {
    /// Captured ScholarOne (IEEE) dashboard HTML.
    #[arg(long, value_name = "FILE")]
    ieee: Option<PathBuf>,

    /// Captured Editorial Manager (Elsevier) dashboard HTML.
    #[arg(long, value_name = "FILE")]
    elsevier: Option<PathBuf>,

    /// URL the IEEE page was captured from, stored as the record link.
    #[arg(long, value_name = "URL")]
    ieee_url: Option<String>,

    /// URL the Elsevier page was captured from.
    #[arg(long, value_name = "URL")]
    elsevier_url: Option<String>,

    /// Snapshot file path (overrides DATA_FILE).
    #[arg(long, value_name = "FILE")]
    data_file: Option<PathBuf>,

    /// Also write logs to ./monitor.log.
    #[arg(long)]
    log_file: bool,

    /// Delete the persisted snapshot and exit.
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::AppConfig::from_env();

    let destination = if cli.log_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    };
    logging::initialize(destination, config.log_level);

    let data_file = cli.data_file.clone().unwrap_or(config.data_file);
    let store = SnapshotStore::new(data_file);
    monitor_info!("using snapshot at {}", store.path().display());

    if cli.reset {
        store.clear().context("failed to clear snapshot")?;
        println!("Snapshot cleared: {}", store.path().display());
        return Ok(());
    }

    let mut pages = Vec::new();
    if let Some(path) = &cli.ieee {
        pages.push(load_page(path, SourceProfile::ieee(), cli.ieee_url.clone())?);
    }
    if let Some(path) = &cli.elsevier {
        pages.push(load_page(
            path,
            SourceProfile::elsevier(),
            cli.elsevier_url.clone(),
        )?);
    }
    if pages.is_empty() {
        bail!("no dashboard pages given; pass --ieee and/or --elsevier");
    }

    let report = run_once(&store, &pages).context("monitoring run failed")?;
    print!("{}", report::format_report(&report));
    Ok(())
}

fn load_page(
    path: &Path,
    profile: SourceProfile,
    url: Option<String>,
) -> Result<(SourceProfile, HtmlPage)> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("failed to read dashboard page {}", path.display()))?;
    Ok((profile, HtmlPage::parse(&html, url)))
}
