//! Integration tests for the yatra CLI

use std::process::{Command, Output};

fn yatra(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    Command::new(env!("CARGO_BIN_EXE_yatra"))
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_cli_help() {
    let output = yatra(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("budget estimator"));
    assert!(stdout.contains("estimate"));
    assert!(stdout.contains("serve"));
}

#[test]
fn test_estimate_json() {
    let output = yatra(&[
        "estimate",
        "--budget",
        "10000",
        "--duration",
        "3-4 days",
        "--json",
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let estimate: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(estimate["days"], 4);
    assert_eq!(estimate["travelStyle"], "mid-range");
    assert_eq!(estimate["breakdown"]["accommodation"], 4000);
    assert_eq!(estimate["breakdown"]["total"], 10000);
    assert_eq!(estimate["status"]["level"], "good");
}

#[test]
fn test_estimate_summary_text() {
    let output = yatra(&[
        "estimate",
        "--budget",
        "₹5,000",
        "--duration",
        "1-2 days",
        "--style",
        "premium",
        "--from",
        "Pune",
        "--to",
        "Goa",
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trip from Pune to Goa"));
    assert!(stdout.contains("₹6,499"));
}

#[test]
fn test_estimate_rejects_non_positive_budget() {
    for budget in ["0", "-500", "abc"] {
        let output = yatra(&["estimate", "--budget", budget]);

        assert!(!output.status.success(), "budget {budget} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid input"), "got: {stderr}");
    }
}

#[test]
fn test_cities_lists_catalog() {
    let output = yatra(&["cities"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Jaipur (Rajasthan)"));
    assert!(stdout.contains("Varanasi (Uttar Pradesh)"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = yatra(&["teleport"]);
    assert!(!output.status.success());
}
