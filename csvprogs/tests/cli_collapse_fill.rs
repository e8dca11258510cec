mod helpers;

use assert_cmd::Command;
use helpers::*;
use predicates::prelude::*;

fn bin(name: &str) -> Command {
    Command::cargo_bin(name).unwrap()
}

#[test]
fn collapse_documented_example() {
    bin("csvcollapse")
        .args(["-k", "time"])
        .write_stdin("time,pos1,pos2,pos3\n11:00,,-1,3\n12:00,1,,1\n12:00,,1,2\n")
        .assert()
        .success()
        .stdout("time,pos1,pos2,pos3\r\n11:00,,-1,3\r\n12:00,1,1,2\r\n");
}

#[test]
fn collapse_empty_input_writes_only_header() {
    bin("csvcollapse")
        .args(["-k", "time"])
        .write_stdin("time,v\n")
        .assert()
        .success()
        .stdout("time,v\r\n");
}

#[test]
fn collapse_requires_keys() {
    bin("csvcollapse")
        .write_stdin("time,v\n1,2\n")
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn collapse_reads_and_writes_named_files() {
    let input = csv_file("k,v\r\na,1\r\na,2\r\nb,3\r\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    bin("csvcollapse")
        .args(["-k", "k"])
        .arg(input.path())
        .arg(&out)
        .assert()
        .success()
        .stdout("");
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, "k,v\r\na,2\r\nb,3\r\n");
}

#[test]
fn merge_then_collapse_halves_duplicated_dates() {
    let body: String = (1..=28)
        .map(|d| format!("2024-02-{d:02},{d}\r\n"))
        .collect();
    let a = csv_file(&format!("Date,Close\r\n{body}"));
    let b = csv_file(&format!("Date,Close\r\n{body}"));
    let merged = bin("csvmerge")
        .args(["-k", "Date", "-d", "Date"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let merged_text = String::from_utf8(merged.clone()).unwrap();
    assert_eq!(data_rows(&merged_text), 56);

    let collapsed = bin("csvcollapse")
        .args(["-k", "Date"])
        .write_stdin(merged)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let collapsed_text = String::from_utf8(collapsed).unwrap();
    assert_eq!(data_rows(&collapsed_text), 28);
    assert!(collapsed_text.contains("2024-02-01T00:00,1\r\n"));
}

#[test]
fn fill_documented_example_from_file() {
    let merged = csv_file(MERGED);
    bin("csvfill")
        .args(["-k", "position"])
        .arg(merged.path())
        .assert()
        .success()
        .stdout(FILLED);
}

#[test]
fn fill_from_stdin() {
    bin("csvfill")
        .args(["-k", "position"])
        .write_stdin(MERGED)
        .assert()
        .success()
        .stdout(FILLED);
}

#[test]
fn fill_too_many_files_is_usage_error() {
    bin("csvfill")
        .args(["-k", "position", "a.csv", "b.csv", "c.csv"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Too many input files"));
}

#[test]
fn fill_requires_keys() {
    bin("csvfill")
        .write_stdin(MERGED)
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn fill_unknown_column_is_rejected() {
    bin("csvfill")
        .args(["-k", "nope"])
        .write_stdin(MERGED)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn merge_fill_pipeline() {
    let a = csv_file(FIRST);
    let b = csv_file(SECOND);
    let merged = bin("csvmerge")
        .args(["-k", "time"])
        .arg(a.path())
        .arg(b.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    bin("csvfill")
        .args(["-k", "position"])
        .write_stdin(merged)
        .assert()
        .success()
        .stdout(FILLED);
}
