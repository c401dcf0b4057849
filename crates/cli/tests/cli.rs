use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn resonance() -> Command {
    let mut cmd = Command::cargo_bin("resonance").expect("binary");
    cmd.arg("--quiet");
    cmd
}

fn run_json(args: &[&str]) -> Value {
    let output = resonance()
        .arg("--json")
        .args(args)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn groups_lists_anagram_pair() {
    resonance()
        .args(["--words", "Beans, Dream, Snaeb", "groups", "--layer", "Simple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Shared resonances"))
        .stdout(predicate::str::contains("Beans, Snaeb"));
}

#[test]
fn number_report_finds_matching_items() {
    let body = run_json(&["--words", "Beans, Dream, Snaeb", "number", "48"]);
    let matches = body["matches"].as_array().expect("matches");
    assert!(!matches.is_empty());
    for found in matches {
        let items: Vec<&str> = found["items"]
            .as_array()
            .expect("items")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(!items.contains(&"Dream"), "unexpected Dream in {found}");
    }
    assert_eq!(body["facts"]["value"], 48);
}

#[test]
fn export_writes_sorted_items() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("items.txt");
    resonance()
        .args(["--words", "snaeb; beans", "--words", "Dream", "export", "--out"])
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "Beans\nDream\nSnaeb\n");
}

#[test]
fn export_to_stdout_without_out() {
    resonance()
        .args(["--words", "Dream, Beans", "export"])
        .assert()
        .success()
        .stdout("Beans\nDream\n");
}

#[test]
fn view_with_unknown_layer_reports_reason() {
    resonance()
        .args([
            "--words",
            "Beans, Snaeb",
            "view",
            "--state-json",
            r#"{"layers": ["Nope"]}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Query rejected: Unknown layer: Nope"));
}

#[test]
fn view_json_contains_positions() {
    let body = run_json(&["--words", "Beans, Snaeb", "view"]);
    let nodes = body["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n["position"].as_array().map(Vec::len) == Some(3)));
    assert!(!body["edges"].as_array().expect("edges").is_empty());
}

#[test]
fn view_state_file_and_inline_conflict() {
    resonance()
        .args(["view", "--state", "a.json", "--state-json", "{}"])
        .assert()
        .failure();
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("resonance.json");
    fs::write(&config, r#"{"layout": {"seeed": 1}}"#).unwrap();
    resonance()
        .arg("--config")
        .arg(&config)
        .arg("groups")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config keys: layout.seeed"));
}

#[test]
fn input_file_name_becomes_origin() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("beans.txt");
    fs::write(&input, "beans snaeb\n").unwrap();

    let output = resonance()
        .arg("--json")
        .arg("--input")
        .arg(&input)
        .args(["report", "Beans"])
        .output()
        .expect("command run");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(body["origins"], serde_json::json!(["beans.txt"]));
    assert!(body["shared"]
        .as_array()
        .expect("shared")
        .iter()
        .any(|s| s["others"] == serde_json::json!(["Snaeb"])));
}

#[test]
fn report_for_unknown_item_fails() {
    resonance()
        .args(["--words", "Beans", "report", "Dream"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dream"));
}

#[test]
fn number_report_handles_huge_and_infinite_input() {
    for number in ["1e20", "inf"] {
        let body = run_json(&["--words", "Beans", "number", number]);
        assert_eq!(body["facts"]["perfect_square"], false, "{number}");
        assert_eq!(body["facts"]["prime"], false, "{number}");
        assert!(body["matches"].as_array().expect("matches").is_empty());
    }
}
