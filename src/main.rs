//! `nuget-warden`: fail a build when a project declares a blocked NuGet package.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and resolve the scan mode ([`models::ScanMode`]).
//! 2. Load the blocked rule set ([`config::load_blocked_rules`]).
//! 3. Pick the extractor for the mode and find documents ([`extractor`], [`discovery`]).
//! 4. Check each document's declarations against the rules ([`policy`], [`version`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (clean or no rules) or `1` (blocked package, configuration error
//!    or unreadable project document).

mod cli;
mod config;
mod discovery;
mod extractor;
mod models;
mod policy;
mod report;
mod scan;
mod version;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, ReportFormat};
use config::load_blocked_rules;
use models::{ScanMode, ScanOutcome};
use report::terminal::TerminalProgress;
use scan::{ScanAborted, ScanObserver, ScanSummary};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // An unknown mode is fatal before anything is read
    let mode: ScanMode = cli.mode.parse()?;

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let rules = load_blocked_rules(&cli.config)?;
    log::debug!("loaded {} blocked rule(s) from {}", rules.len(), cli.config.display());

    let mut progress: Box<dyn ScanObserver> = match cli.report {
        ReportFormat::Terminal if !cli.quiet => Box::new(TerminalProgress::new(&project_dir)),
        _ => Box::new(scan::Silent),
    };

    let summary = match scan::run(&rules, &project_dir, mode, progress.as_mut()) {
        Ok(summary) => summary,
        Err(err) => {
            // Report what was found before the unreadable document, then fail.
            if let Some(aborted) = err.downcast_ref::<ScanAborted>() {
                render(&cli, &aborted.summary, &project_dir)?;
            }
            return Err(err);
        }
    };

    render(&cli, &summary, &project_dir)?;

    if summary.outcome == ScanOutcome::Blocked {
        std::process::exit(1);
    }

    Ok(())
}

fn render(cli: &Cli, summary: &ScanSummary, project_dir: &Path) -> Result<()> {
    match cli.report {
        ReportFormat::Terminal => report::terminal::render(summary, project_dir, cli.quiet),
        ReportFormat::Json => report::json::render(summary),
    }
}
