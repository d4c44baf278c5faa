use std::path::Path;

use crate::config::BlockedRuleSet;
use crate::models::{DependencyDeclaration, MatchReport, ParseFailure};
use crate::version::{SemanticVersion, VersionError, VersionRange};

/// Result of checking one document's declarations against the rule set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub matches: Vec<MatchReport>,
    pub failures: Vec<ParseFailure>,
}

impl Evaluation {
    pub fn is_blocked(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Check every declaration against every rule whose id matches (ignoring case).
///
/// Reports come out in declaration order, then rule order. A declaration may
/// match several rules; each match is reported. When either the declared
/// version or the rule's range cannot be parsed, that pair is recorded as a
/// [`ParseFailure`] and evaluation moves on.
pub fn evaluate(
    rules: &BlockedRuleSet,
    declarations: &[DependencyDeclaration],
    source: &Path,
) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for decl in declarations {
        for rule in rules.iter().filter(|r| r.matches_id(&decl.id)) {
            let parsed = SemanticVersion::parse(&decl.version)
                .and_then(|v| VersionRange::parse(&rule.range).map(|r| (v, r)));

            let (version, range) = match parsed {
                Ok(pair) => pair,
                Err(err) => {
                    log::debug!("cannot compare {} {} with '{}': {}", decl.id, decl.version, rule.range, err);
                    evaluation.failures.push(failure(decl, &rule.range, source, &err));
                    continue;
                }
            };

            if range.satisfies(&version) {
                evaluation.matches.push(MatchReport {
                    id: decl.id.clone(),
                    resolved_version: version.to_string(),
                    rule_id: rule.id.clone(),
                    rule_range: rule.range.clone(),
                    source: source.to_path_buf(),
                });
            }
        }
    }

    evaluation
}

fn failure(decl: &DependencyDeclaration, range: &str, source: &Path, err: &VersionError) -> ParseFailure {
    ParseFailure {
        id: decl.id.clone(),
        version_text: decl.version.clone(),
        rule_range: range.to_string(),
        source: source.to_path_buf(),
        reason: err.to_string(),
    }
}
