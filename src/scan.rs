use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::config::{BlockedRuleSet, ConfigError};
use crate::extractor;
use crate::models::{MatchReport, ParseFailure, ScanMode, ScanOutcome};
use crate::policy::{evaluate, Evaluation};

/// One document that was read during a scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedDocument {
    pub path: PathBuf,
    pub declarations: usize,
}

/// Everything a run produced, in scan order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub outcome: ScanOutcome,
    pub documents: Vec<ScannedDocument>,
    pub matches: Vec<MatchReport>,
    pub parse_failures: Vec<ParseFailure>,
}

impl ScanSummary {
    fn new(outcome: ScanOutcome) -> Self {
        Self {
            outcome,
            documents: Vec::new(),
            matches: Vec::new(),
            parse_failures: Vec::new(),
        }
    }
}

/// Receives progress while [`run`] walks the documents.
pub trait ScanObserver {
    /// Called once discovery has finished, before the first document is read.
    fn scan_started(&mut self, _root: &Path, _documents: &[PathBuf]) {}

    /// Called right after each document has been evaluated.
    fn document_scanned(&mut self, _document: &ScannedDocument, _evaluation: &Evaluation) {}
}

/// Observer that ignores all progress.
pub struct Silent;

impl ScanObserver for Silent {}

/// A document could not be extracted, so the scan stopped there.
///
/// `summary` holds what the documents before it produced. Its outcome is
/// [`ScanOutcome::Blocked`] if any of them matched a rule, otherwise
/// [`ScanOutcome::Incomplete`].
#[derive(Debug, Error)]
#[error("scan stopped at {}: {:#}", .document.display(), .cause)]
pub struct ScanAborted {
    pub document: PathBuf,
    pub summary: ScanSummary,
    pub cause: anyhow::Error,
}

/// Scan `project_dir` with the extractor for `mode` and check every document
/// against `rules`.
///
/// An empty rule set short-circuits to [`ScanOutcome::NoRulesLoaded`] without
/// touching the filesystem. A missing project directory or, in central mode, a
/// missing `Directory.Packages.props` fails before any document is read. A
/// document that cannot be extracted fails with [`ScanAborted`].
pub fn run(
    rules: &BlockedRuleSet,
    project_dir: &Path,
    mode: ScanMode,
    observer: &mut dyn ScanObserver,
) -> Result<ScanSummary> {
    if rules.is_empty() {
        return Ok(ScanSummary::new(ScanOutcome::NoRulesLoaded));
    }

    if !project_dir.is_dir() {
        return Err(ConfigError::ProjectDirNotFound(project_dir.to_path_buf()).into());
    }

    let extractor = extractor::for_mode(mode);
    let documents = extractor.discover(project_dir)?;
    log::debug!(
        "{} mode: {} document(s), {} rule(s)",
        mode,
        documents.len(),
        rules.len()
    );
    observer.scan_started(project_dir, &documents);

    let mut summary = ScanSummary::new(ScanOutcome::Clean);
    for path in documents {
        let declarations = match extractor.extract(&path) {
            Ok(declarations) => declarations,
            Err(cause) => {
                if summary.outcome != ScanOutcome::Blocked {
                    summary.outcome = ScanOutcome::Incomplete;
                }
                return Err(ScanAborted {
                    document: path,
                    summary,
                    cause,
                }
                .into());
            }
        };
        let evaluation = evaluate(rules, &declarations, &path);

        if evaluation.is_blocked() {
            summary.outcome = ScanOutcome::Blocked;
        }
        let document = ScannedDocument {
            path,
            declarations: declarations.len(),
        };
        observer.document_scanned(&document, &evaluation);

        summary.documents.push(document);
        summary.matches.extend(evaluation.matches);
        summary.parse_failures.extend(evaluation.failures);
    }

    Ok(summary)
}
