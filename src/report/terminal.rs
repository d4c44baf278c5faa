use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{MatchReport, ScanOutcome};
use crate::policy::Evaluation;
use crate::scan::{ScanObserver, ScanSummary, ScannedDocument};

/// Prints the banner and one block per document while the scan runs.
pub struct TerminalProgress {
    root: PathBuf,
}

impl TerminalProgress {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl ScanObserver for TerminalProgress {
    fn scan_started(&mut self, root: &Path, _documents: &[PathBuf]) {
        println!(
            "\n {} v{}",
            "nuget-warden".bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(" Scanning: {}\n", root.display());
    }

    fn document_scanned(&mut self, document: &ScannedDocument, evaluation: &Evaluation) {
        println!(
            "  {} {} ({} dependencies)",
            "→".cyan(),
            relative(&document.path, &self.root),
            document.declarations
        );

        for m in &evaluation.matches {
            println!(
                "    {} Blocked package: {} {} in '{}' (matches '{}')",
                "✗".red(),
                m.id.bold(),
                m.resolved_version,
                relative(&m.source, &self.root),
                m.rule_range
            );
        }

        for f in &evaluation.failures {
            println!(
                "    {} Could not compare {} '{}' in '{}' with '{}': {}",
                "[WARN]".yellow().bold(),
                f.id,
                f.version_text,
                relative(&f.source, &self.root),
                f.rule_range,
                f.reason
            );
        }
    }
}

/// Render the end-of-scan part of the terminal report.
///
/// Per-document lines are printed earlier by [`TerminalProgress`]. Paths are
/// shown relative to `root` when they live under it. With `quiet`, only the
/// final summary line is printed.
pub fn render(summary: &ScanSummary, root: &Path, quiet: bool) -> Result<()> {
    if summary.outcome == ScanOutcome::NoRulesLoaded {
        println!("{} No blocked packages defined.", "ℹ".cyan());
        return Ok(());
    }

    if !quiet {
        println!();
        if !summary.matches.is_empty() {
            render_table(&summary.matches, root);
            println!();
        }
    }

    match summary.outcome {
        ScanOutcome::Blocked => println!(
            "{} {} blocked dependenc{} found in {} document(s). Build failed.",
            "✗".red(),
            summary.matches.len().to_string().red().bold(),
            if summary.matches.len() == 1 { "y" } else { "ies" },
            summary.documents.len()
        ),
        ScanOutcome::Incomplete => println!(
            "{} Scan stopped after {} document(s). Build failed.",
            "✗".red(),
            summary.documents.len()
        ),
        _ => println!(
            "{} No blocked dependencies detected in {} document(s).",
            "✓".green(),
            summary.documents.len()
        ),
    }

    Ok(())
}

fn render_table(matches: &[MatchReport], root: &Path) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Blocked Range").add_attribute(Attribute::Bold),
            Cell::new("Document").add_attribute(Attribute::Bold),
        ]);

    for m in matches {
        table.add_row(vec![
            Cell::new(&m.id),
            Cell::new(&m.resolved_version).fg(Color::Red),
            Cell::new(&m.rule_range),
            Cell::new(relative(&m.source, root)),
        ]);
    }

    println!("{}", table);
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
