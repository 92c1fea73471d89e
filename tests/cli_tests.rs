//! Tests driving the `cogor` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

use crate::common::{write_fixture, EXPECTED_ROWS, ORGANISM};

fn cogor() -> Command {
    Command::cargo_bin("cogor").unwrap()
}

#[test]
fn test_help_lists_commands() {
    cogor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("annotate"))
        .stdout(predicate::str::contains("split-cds"))
        .stdout(predicate::str::contains("merge-hits"));
}

#[test]
fn test_annotate_text_summary() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    cogor()
        .args(["annotate", "-n", ORGANISM, "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("-t")
        .assert()
        .success()
        .stdout(predicate::str::contains("COGor consensus for ecoli"))
        .stdout(predicate::str::contains("Features written: 6"))
        .stdout(predicate::str::contains("legend.svg"));

    let table = fs::read_to_string(output.path().join("file_to_plot.txt")).unwrap();
    assert!(table.starts_with(EXPECTED_ROWS[0]));
    assert!(output.path().join("track_template").is_file());
}

#[test]
fn test_annotate_json_summary() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    let assert = cogor()
        .args(["--format", "json", "annotate", "-n", ORGANISM, "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["organism"], "ecoli");
    assert_eq!(json["features"], 6);
    assert_eq!(json["agreements"]["all_agree"], 1);
    assert_eq!(json["augment"]["ncrna_added"], 1);
}

#[test]
fn test_annotate_tsv_summary() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    cogor()
        .args(["annotate", "--format", "tsv", "-n", ORGANISM, "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("organism\tfeatures\ttool"))
        .stdout(predicate::str::contains("ecoli\t6\tOperon-mapper\t4\t3"));
}

#[test]
fn test_missing_input_fails() {
    let input = tempfile::tempdir().unwrap();

    cogor()
        .args(["annotate", "-n", ORGANISM, "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing input file"))
        .stderr(predicate::str::contains("ecoli_eggnog.gff"));
}

#[test]
fn test_invalid_organism_fails() {
    cogor()
        .args(["annotate", "-n", "../ecoli"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid organism name"));
}

#[test]
fn test_track_command() {
    let output = tempfile::tempdir().unwrap();

    cogor()
        .args(["track", "--track-size", "8", "-o"])
        .arg(output.path())
        .assert()
        .success();

    let track = fs::read_to_string(output.path().join("track_template")).unwrap();
    assert_eq!(track.lines().count(), 84);
    assert!(track.starts_with("0.95\t8.0\ttrue\tfalse"));

    let legend = fs::read_to_string(output.path().join("legend.svg")).unwrap();
    assert!(legend.contains("[S] Function unknown"));
}

#[test]
fn test_split_cds() {
    let dir = tempfile::tempdir().unwrap();
    let fasta: String = (1..=4001)
        .map(|i| format!(">lcl|NC_1_cds_P{i}_{i} [location={i}..{}]\nATG\n", i + 2))
        .collect();
    let input = dir.path().join("ecoli_cds.txt");
    fs::write(&input, fasta).unwrap();

    cogor()
        .args(["split-cds", "-n", ORGANISM, "-o"])
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("ecoli_genes1.fasta: 3500 sequences"))
        .stdout(predicate::str::contains("ecoli_genes2.fasta: 501 sequences"));

    let second = fs::read_to_string(dir.path().join("ecoli_genes2.fasta")).unwrap();
    assert!(second.starts_with(">lcl|NC_1_cds_P3501_3501"));
}

#[test]
fn test_split_cds_small_file_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ecoli_cds.txt");
    fs::write(&input, ">a [location=1..3]\nATG\n").unwrap();

    cogor()
        .args(["split-cds", "-n", ORGANISM, "-o"])
        .arg(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("no split is needed"));

    assert!(!dir.path().join("ecoli_genes1.fasta").exists());
}

#[test]
fn test_merge_hits() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("hitdata1.txt");
    let second = dir.path().join("hitdata2.txt");
    fs::write(&first, "#Batch CD-search tool\nQuery\tHit type\nQ#1 - a\tspecific\n").unwrap();
    fs::write(&second, "#Batch CD-search tool\nQuery\tHit type\nQ#1 - b\tspecific\n").unwrap();

    cogor()
        .args(["merge-hits", "-n", ORGANISM, "-o"])
        .arg(dir.path())
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    let merged = fs::read_to_string(dir.path().join("ecoli_merged_hitdata.txt")).unwrap();
    assert_eq!(merged, "Q#1 - a\tspecific\nQ#1 - b\tspecific\n");
}

#[test]
fn test_merge_hits_requires_two_reports() {
    let dir = tempfile::tempdir().unwrap();
    let only = dir.path().join("hitdata1.txt");
    fs::write(&only, "Q#1 - a\tspecific\n").unwrap();

    cogor()
        .args(["merge-hits", "-n", ORGANISM])
        .arg(&only)
        .assert()
        .failure();
}
