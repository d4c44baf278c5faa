//! End-to-end tests driving the `nuget-warden` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NEWTONSOFT_RULE: &str = r#"packages:
  - id: Newtonsoft.Json
    version: "(,13.0.0)"
"#;

fn csproj(package: &str, version: &str) -> String {
    format!(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="{package}" Version="{version}" />
  </ItemGroup>
</Project>"#
    )
}

/// A temp repo with a rule file and the given project files.
fn setup(rules: Option<&str>, projects: &[(&str, String)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    if let Some(rules) = rules {
        fs::write(temp_dir.path().join("blocked-packages.yaml"), rules).unwrap();
    }
    for (rel, content) in projects {
        let path = temp_dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    temp_dir
}

fn warden_in(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("nuget-warden").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_blocked_version_fails_build() {
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("src/App/App.csproj", csproj("Newtonsoft.Json", "12.0.3"))],
    );

    warden_in(repo.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Blocked package"))
        .stdout(predicate::str::contains("12.0.3"))
        .stdout(predicate::str::contains("(,13.0.0)"));
}

#[test]
fn test_allowed_version_passes() {
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("src/App/App.csproj", csproj("Newtonsoft.Json", "13.0.1"))],
    );

    warden_in(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No blocked dependencies detected"));
}

#[test]
fn test_missing_config_means_no_rules() {
    let repo = setup(None, &[("App.csproj", csproj("Newtonsoft.Json", "12.0.3"))]);

    warden_in(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No blocked packages defined"));
}

#[test]
fn test_empty_rules_ignore_central_manifest() {
    let repo = setup(Some("packages: []\n"), &[]);

    warden_in(repo.path())
        .args(["--mode", "central"])
        .assert()
        .success();
}

#[test]
fn test_central_mode_without_manifest_fails() {
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("App.csproj", csproj("Newtonsoft.Json", "12.0.3"))],
    );

    warden_in(repo.path())
        .args(["--mode", "central"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Scanning").not())
        .stderr(predicate::str::contains("Directory.Packages.props"));
}

#[test]
fn test_central_mode_blocked() {
    let props = r#"<Project>
  <ItemGroup>
    <PackageVersion Include="Newtonsoft.Json" Version="12.0.1" />
    <PackageVersion Include="Serilog" Version="2.12.0" />
  </ItemGroup>
</Project>"#;
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("Directory.Packages.props", props.to_string())],
    );

    warden_in(repo.path())
        .args(["--mode", "central"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Directory.Packages.props"));
}

#[test]
fn test_unknown_mode_is_config_error() {
    let repo = setup(Some(NEWTONSOFT_RULE), &[]);

    warden_in(repo.path())
        .args(["--mode", "transitive"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown scan mode"));
}

#[test]
fn test_explicit_config_and_project_dir() {
    let policy = setup(None, &[]);
    let rules_path = policy.path().join("rules.yaml");
    fs::write(
        &rules_path,
        "packages:\n  - id: foo.bar\n    version: \"[1.0,2.0)\"\n",
    )
    .unwrap();
    let repo = setup(None, &[("Lib/Lib.csproj", csproj("Foo.Bar", "1.5.0"))]);

    warden_in(policy.path())
        .arg("--config")
        .arg(&rules_path)
        .arg("--project-dir")
        .arg(repo.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Foo.Bar"));
}

#[test]
fn test_malformed_version_does_not_hide_match() {
    let project = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json" Version="$(JsonVersion)" />
    <PackageReference Include="newtonsoft.json" Version="11.0.2" />
  </ItemGroup>
</Project>"#;
    let repo = setup(Some(NEWTONSOFT_RULE), &[("App.csproj", project.to_string())]);

    warden_in(repo.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[WARN]"))
        .stdout(predicate::str::contains("11.0.2"));
}

#[test]
fn test_json_report() {
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("App.csproj", csproj("Newtonsoft.Json", "12.0.3"))],
    );

    let output = warden_in(repo.path())
        .args(["--report", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "blocked");
    assert_eq!(value["matches"].as_array().unwrap().len(), 1);
    assert_eq!(value["matches"][0]["id"], "Newtonsoft.Json");
    assert_eq!(value["matches"][0]["resolved_version"], "12.0.3");
}

#[test]
fn test_quiet_prints_summary_only() {
    let repo = setup(
        Some(NEWTONSOFT_RULE),
        &[("App.csproj", csproj("Newtonsoft.Json", "13.0.1"))],
    );

    warden_in(repo.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanning").not())
        .stdout(predicate::str::contains("No blocked dependencies detected"));
}

#[test]
fn test_invalid_rules_file_fails() {
    let repo = setup(Some("packages: [unterminated"), &[]);

    warden_in(repo.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid blocked packages file"));
}

fn blocked_then_malformed() -> TempDir {
    setup(
        Some(NEWTONSOFT_RULE),
        &[
            ("a/A.csproj", csproj("Newtonsoft.Json", "12.0.3")),
            ("b/B.csproj", "<Project><ItemGroup></Project>".to_string()),
        ],
    )
}

#[test]
fn test_unreadable_document_still_reports_earlier_matches() {
    let repo = blocked_then_malformed();

    warden_in(repo.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Blocked package"))
        .stdout(predicate::str::contains("12.0.3"))
        .stderr(predicate::str::contains("B.csproj"));
}

#[test]
fn test_unreadable_document_json_keeps_partial_summary() {
    let repo = blocked_then_malformed();

    let output = warden_in(repo.path())
        .args(["--report", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "blocked");
    assert_eq!(value["documents"].as_array().unwrap().len(), 1);
    assert_eq!(value["matches"][0]["resolved_version"], "12.0.3");
}

#[test]
fn test_undefined_entity_in_package_id_fails() {
    let project = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json&bogus;" Version="12.0.3" />
  </ItemGroup>
</Project>"#;
    let repo = setup(Some(NEWTONSOFT_RULE), &[("App.csproj", project.to_string())]);

    warden_in(repo.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No blocked dependencies detected").not());
}
