//! Basic CLI E2E tests.
//!
//! Commands are invoked via cargo run against the dev data directory.

use std::process::Command;

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wellness-cli", "--quiet", "--"])
        .args(args)
        .env("WELLNESS_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn status_reports_all_zh_tracks() {
    let (stdout, _, code) = run_cli(&["status", "--locale", "zh-CN"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let tracks = parsed["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 4);
}

#[test]
fn status_reports_interval_tracks_for_english() {
    let (stdout, _, code) = run_cli(&["status"]);
    assert_eq!(code, 0, "status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["tracks"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["easter_egg"], "locked");
}

#[test]
fn config_show_lists_every_bundle() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 4);
}

#[test]
fn config_set_rejects_malformed_bundles() {
    let (_, _, code) = run_cli(&["config", "set", "reminder.water", "{not json"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(&["config", "set", "reminder.nonsense", "{}"]);
    assert_ne!(code, 0);
}

#[test]
fn config_set_and_get_roundtrip() {
    let bundle = r#"{"interval_min":45,"enabled":true,"sound":false}"#;
    let (_, _, code) = run_cli(&["config", "set", "reminder.standup", bundle]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&["config", "get", "reminder.standup"]);
    assert_eq!(code, 0, "config get failed");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["interval_min"], 45);
}

#[test]
fn egg_status_prints_the_stage() {
    let (stdout, _, code) = run_cli(&["egg", "status"]);
    assert_eq!(code, 0, "egg status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["stage"].is_string());
}
