use anyhow::Result;

use crate::scan::ScanSummary;

/// Print the whole scan summary as pretty JSON on stdout.
pub fn render(summary: &ScanSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::{MatchReport, ScanOutcome};
    use crate::scan::{ScanSummary, ScannedDocument};
    use std::path::PathBuf;

    #[test]
    fn test_summary_shape() {
        let summary = ScanSummary {
            outcome: ScanOutcome::Blocked,
            documents: vec![ScannedDocument {
                path: PathBuf::from("App.csproj"),
                declarations: 2,
            }],
            matches: vec![MatchReport {
                id: "Newtonsoft.Json".into(),
                resolved_version: "12.0.3".into(),
                rule_id: "Newtonsoft.Json".into(),
                rule_range: "(,13.0.0)".into(),
                source: PathBuf::from("App.csproj"),
            }],
            parse_failures: vec![],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["outcome"], "blocked");
        assert_eq!(value["documents"][0]["declarations"], 2);
        assert_eq!(value["matches"][0]["resolved_version"], "12.0.3");
        assert_eq!(value["matches"][0]["rule_range"], "(,13.0.0)");
        assert!(value["parse_failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_no_rules_outcome_name() {
        let value = serde_json::to_value(ScanOutcome::NoRulesLoaded).unwrap();
        assert_eq!(value, "no_rules_loaded");
        let value = serde_json::to_value(ScanOutcome::Incomplete).unwrap();
        assert_eq!(value, "incomplete");
    }
}
