//! Runs the built `midtrade` binary against small CSV files, both one-shot and
//! with commands piped on stdin.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const DISPUTES: &str = "\
dispnum,styear,stabb,orig,sidea,ccode
5,1900,AAA,1,1,100
7,1900,AAA,1,1,100
7,1900,BBB,1,0,200
7,1900,CCC,0,0,300
";

const TRADES: &str = "\
importer1,importer2,year,flow1,flow2
AAA,BBB,1899,5,3
AAA,CCC,1899,10,10
BBB,CCC,1899,4,4
AAA,DDD,1899,-9,-9
";

fn write_inputs(dir: &Path) {
    std::fs::write(dir.join("disputes.csv"), DISPUTES).unwrap();
    std::fs::write(dir.join("trade.csv"), TRADES).unwrap();
}

fn midtrade(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_midtrade"))
        .current_dir(dir)
        .args(["--config", "absent.toml"])
        .args(["--disputes", "disputes.csv", "--trade", "trade.csv"])
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn one_shot_json_report() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let output = midtrade(dir.path(), &["--conflict", "7", "--json", "--no-render"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["conflict_id"], 7);
    assert_eq!(report["trade_year"], 1899);
    assert_eq!(report["sides"][0]["instigators"][0], "AAA");
    assert_eq!(report["sides"][1]["combatants"][1], "CCC");
    assert_eq!(report["sides"][0]["trade_matrix"]["AAA"]["BBB"], 8.0);
    assert!(report["sides"][0]["trade_matrix"]["DDD"].is_null());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn one_shot_text_report_renders_files() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let output = midtrade(dir.path(), &["--conflict", "7"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conflict 7 (began 1900, trade year 1899)"));
    assert!(stdout.contains("instigators:    BBB"));
    assert!(dir
        .path()
        .join("output/conflict_7_side_a_trade.svg")
        .exists());
    assert!(dir
        .path()
        .join("output/conflict_7_side_b_combatants.dot")
        .exists());
}

#[test]
fn unknown_conflict_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let output = midtrade(dir.path(), &["--conflict", "99", "--no-render"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Conflict 99 not found"));
}

#[test]
fn missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = midtrade(dir.path(), &["--conflict", "5", "--no-render"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load datasets"));
}

#[test]
fn piped_session_survives_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let mut child = Command::new(env!("CARGO_BIN_EXE_midtrade"))
        .current_dir(dir.path())
        .args(["--config", "absent.toml", "--no-render"])
        .args(["--disputes", "disputes.csv", "--trade", "trade.csv"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"seven\n99\n7\nexit\n5\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'seven' is not a conflict number"));
    assert!(stderr.contains("Conflict 99 not found"));
    assert!(stdout.contains("Conflict 7 (began 1900, trade year 1899)"));
    assert!(!stdout.contains("Conflict 5 "));
}
