//! Tests for the `xml2json` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("patients")
        .join(name)
}

fn xml2json() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xml2json"))
}

#[test]
fn test_prints_pretty_json_to_stdout() {
    let assert = xml2json()
        .arg(fixture_path("mapping.yaml"))
        .arg(fixture_path("patients.xml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"Patient\": [\n"))
        .stdout(predicate::str::ends_with("}\n"));

    let output: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(output["Patient"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("patients.json");

    xml2json()
        .arg(fixture_path("mapping.yaml"))
        .arg(fixture_path("patients.xml"))
        .arg("--output")
        .arg(&out)
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("2 records"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("{\"Patient\":[{"));
    assert!(content.ends_with("}\n"));
}

#[test]
fn test_missing_records_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = dir.path().join("mapping.yaml");
    fs::write(&mapping, "topLevelField: Doctor\n").unwrap();

    xml2json()
        .arg(&mapping)
        .arg(fixture_path("patients.xml"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: No <Doctor> records found"));
}

#[test]
fn test_depth_limit_flag() {
    xml2json()
        .arg(fixture_path("mapping.yaml"))
        .arg(fixture_path("patients.xml"))
        .arg("--max-depth")
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 1"));
}

#[test]
fn test_missing_mapping_file() {
    xml2json()
        .arg("does-not-exist.yaml")
        .arg(fixture_path("patients.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}
