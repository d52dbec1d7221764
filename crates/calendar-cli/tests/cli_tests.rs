//! Integration tests for the `calq` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin input, file output, config files
//! and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the events.json fixture.
fn events_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/events.json")
}

/// Helper: path to the Monday-first config fixture.
fn monday_config_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/monday.toml")
}

/// Helper: run `calq` with args and parse stdout as a JSON array.
fn run_json(args: &[&str]) -> Vec<Value> {
    let output = Command::cargo_bin("calq")
        .unwrap()
        .args(args)
        .output()
        .expect("calq should run");
    assert!(
        output.status.success(),
        "calq failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout must be JSON");
    value.as_array().expect("stdout must be a JSON array").clone()
}

fn ids(events: &[Value]) -> Vec<&str> {
    events.iter().map(|e| e["id"].as_str().unwrap()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// day
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn day_lists_occurrences_in_input_order() {
    let found = run_json(&["day", "--date", "2024-03-08", "-i", events_path()]);

    assert_eq!(ids(&found), vec!["e1-1709856000000", "trip", "lunch"]);
    assert_eq!(found[0]["isRecurringInstance"], true);
    assert_eq!(found[0]["start"], "2024-03-08T00:00:00");
    assert_eq!(found[1]["color"], "amber");
}

#[test]
fn day_agenda_is_chronological() {
    let found = run_json(&["day", "--date", "2024-03-08", "--agenda", "-i", events_path()]);

    assert_eq!(ids(&found), vec!["trip", "e1-1709856000000", "lunch"]);
}

#[test]
fn day_reads_stdin() {
    let input = std::fs::read_to_string(events_path()).unwrap();

    Command::cargo_bin("calq")
        .unwrap()
        .args(["day", "--date", "2024-03-08"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("e1-1709856000000"));
}

#[test]
fn day_with_monday_config_changes_window() {
    // Sunday-first: the week of Sun Mar 10 has nothing touching that day.
    let sunday_first = run_json(&["day", "--date", "2024-03-10", "-i", events_path()]);
    assert!(sunday_first.is_empty());

    // Monday-first: Saturday's late show runs into Sunday.
    let monday_first = run_json(&[
        "--config",
        monday_config_path(),
        "day",
        "--date",
        "2024-03-10",
        "-i",
        events_path(),
    ]);
    assert_eq!(monday_first.len(), 1);
    assert_eq!(monday_first[0]["start"], "2024-03-09T22:00:00");
    assert_eq!(monday_first[0]["end"], "2024-03-10T02:00:00");
}

// ─────────────────────────────────────────────────────────────────────────────
// starting / spanning
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn starting_does_not_expand() {
    let found = run_json(&["starting", "--date", "2024-03-08", "-i", events_path()]);
    assert_eq!(ids(&found), vec!["lunch"]);
}

#[test]
fn spanning_lists_continuations() {
    let found = run_json(&["spanning", "--date", "2024-03-08", "-i", events_path()]);
    assert_eq!(ids(&found), vec!["trip"]);

    let first_day = run_json(&["spanning", "--date", "2024-03-06", "-i", events_path()]);
    assert!(first_day.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// range / expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn range_puts_multi_day_first() {
    let found = run_json(&[
        "range",
        "--from",
        "2024-03-01",
        "--to",
        "2024-03-31",
        "-i",
        events_path(),
    ]);

    // 5 Saturday late shows + trip (multi-day), 5 Friday syncs + lunch.
    assert_eq!(found.len(), 12);
    let first = found[0]["id"].as_str().unwrap();
    assert!(first.starts_with("late-"), "got {}", first);
    let multi_day = &found[..6];
    assert!(multi_day.iter().any(|e| e["id"] == "trip"));
    assert!(found[6..]
        .iter()
        .all(|e| e["id"] == "lunch" || e["id"].as_str().unwrap().starts_with("e1-")));
}

#[test]
fn expand_single_event() {
    let found = run_json(&[
        "expand",
        "--id",
        "e1",
        "--from",
        "2024-03-04",
        "--to",
        "2024-03-10",
        "-i",
        events_path(),
    ]);
    assert_eq!(ids(&found), vec!["e1-1709856000000"]);
}

#[test]
fn expand_writes_output_file() {
    let out = std::env::temp_dir().join(format!("calq-expand-{}.json", std::process::id()));
    let out_str = out.to_str().unwrap();

    Command::cargo_bin("calq")
        .unwrap()
        .args([
            "expand", "--id", "lunch", "--from", "2024-03-01", "--to", "2024-03-31", "-i",
            events_path(), "-o", out_str,
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written[0]["id"], "lunch");
    assert_eq!(written[0]["isRecurringInstance"], false);
    let _ = std::fs::remove_file(&out);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_unknown_id_fails() {
    Command::cargo_bin("calq")
        .unwrap()
        .args([
            "expand", "--id", "missing", "--from", "2024-03-01", "--to", "2024-03-31", "-i",
            events_path(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No event with id 'missing'"));
}

#[test]
fn invalid_date_fails() {
    Command::cargo_bin("calq")
        .unwrap()
        .args(["day", "--date", "someday", "-i", events_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn zero_interval_fails_fast() {
    let input = r#"[{"id":"c","title":"c","start":"2024-03-01T09:00:00","end":"2024-03-01T10:00:00",
        "recurrence":{"type":"custom","interval":0}}]"#;

    Command::cargo_bin("calq")
        .unwrap()
        .args(["day", "--date", "2024-03-08"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid recurrence interval"));
}

#[test]
fn malformed_json_fails() {
    Command::cargo_bin("calq")
        .unwrap()
        .args(["day", "--date", "2024-03-08"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse events JSON"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("calq")
        .unwrap()
        .args(["day", "--date", "2024-03-08", "-i", "/nonexistent/events.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
