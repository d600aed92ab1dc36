//! Integration tests for the sgf-editor binary.
//!
//! Runs the built executable against records in a temporary directory and
//! checks the written output files.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_editor(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_sgf-editor");
    Command::new(exe)
        .args(args)
        .output()
        .expect("failed to start sgf-editor")
}

fn write_record(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn writes_default_transformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(dir.path(), "game.sgf", "(;FF[4]SZ[9];B[ab];W[])");

    let out = run_editor(&[&input, "-t", "1", "-q"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let written = fs::read_to_string(dir.path().join("game_transformed.sgf")).unwrap();
    assert_eq!(written, "(;FF[4]SZ[9];B[ib];W[])");
}

#[test]
fn explicit_output_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(
        dir.path(),
        "legacy.sgf",
        "(;SZ[9];B[ab]C[R: 3\nG: 4\nB: 5\n])",
    );
    let output = dir.path().join("migrated");
    let report = dir.path().join("report.json");

    let out = run_editor(&[
        &input,
        "--rzone",
        "-o",
        output.to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
        "-q",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let written = fs::read_to_string(dir.path().join("migrated.sgf")).unwrap();
    assert_eq!(written, "(;SZ[9];B[ab]RZ[3][4][5]C[])");

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(stats["nodes"], 2);
    assert_eq!(stats["migrated_nodes"], 1);
}

#[test]
fn rejects_non_sgf_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(dir.path(), "game.txt", "(;SZ[9];B[aa])");

    let out = run_editor(&[&input, "-t", "1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a sgf file"));
}

#[test]
fn rejects_unknown_opcode_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(dir.path(), "game.sgf", "(;SZ[9];B[aa])");

    let out = run_editor(&[&input, "-t", "19"]);
    assert!(!out.status.success());
    assert!(!dir.path().join("game_transformed.sgf").exists());
}

#[test]
fn bad_node_reports_index_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(dir.path(), "bad.sgf", "(;SZ[9];B[aa];W[bb]RZ[xyz])");

    let out = run_editor(&[&input, "-t", "2"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("node index: 2 (start from 0)"), "stderr: {}", stderr);
    assert!(stderr.contains(";W[bb]RZ[xyz])"), "stderr: {}", stderr);
    assert!(!dir.path().join("bad_transformed.sgf").exists());
}

#[test]
fn missing_size_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_record(dir.path(), "nosize.sgf", "(;FF[4];B[aa])");

    let out = run_editor(&[&input, "-t", "1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("SZ[size]"));
}
