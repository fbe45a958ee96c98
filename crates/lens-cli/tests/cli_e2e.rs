use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;

fn lens_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lens"))
}

fn fixture(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create fixture");
    file.write_all(body.as_bytes()).expect("write fixture");
    file
}

fn run(args: &[&str], input: Option<&Path>) -> Output {
    let mut command = Command::new(lens_bin());
    command.args(args);
    if let Some(path) = input {
        command.arg("--input").arg(path);
    }
    // Keep the user's API settings and log filter out of the run.
    command
        .env_remove("LENS_API__BASE_URL")
        .env_remove("LENS_LOG")
        .output()
        .expect("run lens")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "lens failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

const BRANDS: &str = r#"[
    {"brand": "A", "revenue": 300},
    {"brand": "B", "revenue": 700},
    {"brand": "A", "revenue": 0},
    {"brand": "B", "revenue": 0},
    {"brand": "B", "revenue": 0},
    {"brand": "B", "revenue": 0},
    {"brand": "A", "revenue": 0},
    {"brand": "B", "revenue": 0},
    {"brand": "B", "revenue": 0},
    {"brand": "B", "revenue": 0}
]"#;

#[test]
fn table_filters_sorts_and_pages() {
    let file = fixture(BRANDS);
    let output = run(
        &[
            "table",
            "--one-of",
            "brand=B",
            "--sort",
            "revenue:desc",
            "--page-size",
            "3",
        ],
        Some(file.path()),
    );
    let page = stdout_json(&output);
    assert_eq!(page["total_items"], 7);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["current_page"], 1);
    assert_eq!(page["items"][0]["revenue"], 700);
}

#[test]
fn categorical_shares_match_brand_split() {
    let file = fixture(BRANDS);
    let output = run(
        &["chart", "categorical", "--key", "brand", "--shares"],
        Some(file.path()),
    );
    let chart = stdout_json(&output);
    assert_eq!(chart["has_data"], true);
    assert_eq!(chart["labels"], serde_json::json!(["B", "A"]));
    assert_eq!(chart["datasets"][0]["data"], serde_json::json!([70.0, 30.0]));
}

#[test]
fn schema_needs_no_source() {
    let output = run(&["schema", "chart", "--format", "raw"], None);
    let schema = stdout_json(&output);
    assert!(schema["properties"]["datasets"].is_object());
}

#[test]
fn missing_source_fails_with_message() {
    let output = run(&["table"], None);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lens error"));
    assert!(stderr.contains("--input"));
}

#[test]
fn malformed_json_is_reported() {
    let file = fixture("{not json");
    let output = run(&["table"], Some(file.path()));
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load records"));
}
