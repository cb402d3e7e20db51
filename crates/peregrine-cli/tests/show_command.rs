use assert_cmd::Command;
use peregrine_core::metrics::Rating;
use peregrine_core::suggestion::Severity;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_peregrine_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("peregrine")
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("report.json")
}

/// Test that load_report reads a saved report back with its metrics intact
#[test]
fn test_load_report_returns_saved_analysis() {
    let result = peregrine_cli::commands::show::load_report(&fixture_path());

    assert!(result.is_ok(), "Should successfully load the report");

    let report = result.unwrap();
    assert_eq!(report.url, "https://example.com/");
    assert_eq!(report.metrics.core_web_vitals.lcp.value, Some(1400.0));
    assert_eq!(report.metrics.core_web_vitals.lcp.rating, Rating::Good);
    assert_eq!(report.metrics.core_web_vitals.fid.rating, Rating::Unknown);
    assert_eq!(report.metrics.resources.total_requests, 3);
    assert_eq!(report.resources.len(), 3);
}

/// Test that suggestion severities survive the round trip
#[test]
fn test_load_report_preserves_suggestions() {
    let report = peregrine_cli::commands::show::load_report(&fixture_path())
        .expect("Failed to load report");

    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].severity, Severity::Success);
    assert!(report.suggestions[0].message.contains("Great performance"));
}

#[test]
fn test_show_pretty_renders_sections() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(fixture_path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Page Load Analysis: https://example.com/",
        ))
        .stdout(predicate::str::contains("Core Web Vitals"))
        .stdout(predicate::str::contains("Navigation Timing"))
        .stdout(predicate::str::contains("Resources"))
        .stdout(predicate::str::contains("Great performance!"));
}

#[test]
fn test_show_json_outputs_the_document() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(fixture_path()).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("coreWebVitals"))
        .stdout(predicate::str::contains("\"lcp\""))
        .stdout(predicate::str::contains("https://example.com/"));
}

#[test]
fn test_show_table_emits_metric_rows() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(fixture_path()).arg("--format").arg("table");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Metric,Value"))
        .stdout(predicate::str::contains("LCP (ms),1400"))
        .stdout(predicate::str::contains("LCP Rating,good"))
        .stdout(predicate::str::contains("Total Requests,3"));
}

#[test]
fn test_show_resources_includes_waterfall() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(fixture_path()).arg("--resources");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Waterfall"))
        .stdout(predicate::str::contains("app.js"))
        .stdout(predicate::str::contains("hero.png"));
}

/// The command implementations live in the library crate; the log filter
/// has to name that target or their events never render.
#[test]
fn test_show_logs_report_load_at_default_verbosity() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(fixture_path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loading report from"));
}

#[test]
fn test_show_missing_file_fails() {
    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg("no-such-report.json");

    cmd.assert().failure();
}

#[test]
fn test_show_rejects_malformed_json() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("Failed to write file");

    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse report"));
}

#[test]
fn test_show_rejects_report_without_url() {
    // Parses fine but fails validation
    let fixture = std::fs::read_to_string(fixture_path()).expect("Failed to read fixture");
    let mut report: serde_json::Value =
        serde_json::from_str(&fixture).expect("Fixture should be valid JSON");
    report["url"] = serde_json::Value::String(String::new());

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("no-url.json");
    std::fs::write(&path, report.to_string()).expect("Failed to write file");

    let mut cmd = Command::new(get_peregrine_bin());
    cmd.arg("show").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing report URL"));
}
