//! End-to-end runs of the annotation pipeline on the fixture genome.

mod common;

use std::fs;
use std::io::Write;
use std::path::Path;

use cogor::consensus::ConsensusError;
use cogor::pipeline::{run, PipelineConfig, PipelineError};
use cogor::Tool;

use crate::common::{write_fixture, EXPECTED_ROWS, GENOME, ORGANISM};

fn config(input: &Path, output: &Path) -> PipelineConfig {
    PipelineConfig {
        organism: ORGANISM.to_string(),
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_consensus_table() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    run(&config(input.path(), output.path())).unwrap();

    let table = fs::read_to_string(output.path().join("file_to_plot.txt")).unwrap();
    let expected = format!("{}\n\n{GENOME}", EXPECTED_ROWS.join("\n"));
    assert_eq!(table, expected);
}

#[test]
fn test_report_counts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    let report = run(&config(input.path(), output.path())).unwrap();

    assert_eq!(report.organism, "ecoli");
    assert_eq!(report.features, 6);
    assert_eq!(report.genome.sequences, 1);
    assert_eq!(report.genome.total_length, 30);
    assert_eq!(report.augment.pseudogenes_reclassified, 1);
    assert_eq!(report.augment.ncrna_added, 1);

    let counts: Vec<(Tool, usize, usize)> = report
        .tools
        .iter()
        .map(|t| (t.tool, t.records, t.chosen))
        .collect();
    assert_eq!(
        counts,
        vec![
            (Tool::EggnogMapper, 3, 1),
            (Tool::OperonMapper, 4, 3),
            (Tool::CdSearch, 3, 1),
        ]
    );

    assert_eq!(report.agreements.get("all_agree"), Some(&1));
    assert_eq!(report.agreements.get("pair_operon_cd_search"), Some(&1));
    assert_eq!(report.agreements.get("all_missing"), Some(&2));
    assert_eq!(report.agreements.get("two_missing"), Some(&1));

    assert_eq!(report.outputs, vec![output.path().join("file_to_plot.txt")]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tools"][0]["tool"], "eggnog_mapper");
}

#[test]
fn test_optional_outputs() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    let config = PipelineConfig {
        track: true,
        keep_intermediate: true,
        ..config(input.path(), &output.path().join("nested"))
    };
    let report = run(&config).unwrap();
    assert_eq!(report.outputs.len(), 6);

    let dir = output.path().join("nested");
    for name in [
        "em_ecoli.gff",
        "om_ecoli.gff",
        "batch_ecoli.gff",
        "file_to_plot.txt",
        "track_template",
        "legend.svg",
    ] {
        assert!(dir.join(name).is_file(), "{name} not written");
    }

    let batch = fs::read_to_string(dir.join("batch_ecoli.gff")).unwrap();
    let lines: Vec<&str> = batch.lines().collect();
    assert_eq!(
        lines[0],
        "seqname\tsource\ttype\tstart\tend\tscore\tstrand\tframe\tattribute"
    );
    assert_eq!(
        lines[1],
        "NC_000913.3\tunknown\tCDS\t100\t400\t.\t+\t0\tCOG=COG0001"
    );

    let track = fs::read_to_string(dir.join("track_template")).unwrap();
    assert_eq!(track.lines().count(), 84);
}

#[test]
fn test_reference_passes_disabled() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());
    fs::remove_file(input.path().join("ecoli.gff3")).unwrap();

    let mut config = config(input.path(), output.path());
    config.augment.reclassify_pseudogenes = false;
    config.augment.include_ncrna = false;
    let report = run(&config).unwrap();
    assert_eq!(report.features, 5);

    let table = fs::read_to_string(output.path().join("file_to_plot.txt")).unwrap();
    assert!(!table.contains("pseudogene"));
    assert!(!table.contains("ncRNA"));
}

#[test]
fn test_missing_reference_when_needed() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());
    fs::remove_file(input.path().join("ecoli.gff3")).unwrap();

    match run(&config(input.path(), output.path())) {
        Err(PipelineError::MissingFile(path)) => assert!(path.ends_with("ecoli.gff3")),
        other => panic!("expected missing reference, got {other:?}"),
    }
}

#[test]
fn test_ambiguous_key_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    let mut orfs = fs::OpenOptions::new()
        .append(true)
        .open(input.path().join("ecoli_orf_operon.txt"))
        .unwrap();
    writeln!(
        orfs,
        "NC_000913.3\tOperon-mapper\tCDS\t100\t450\t.\t+\t0\tID=ORF_5"
    )
    .unwrap();

    let err = run(&config(input.path(), output.path())).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Consensus(ConsensusError::AmbiguousKey {
            tool: Tool::OperonMapper,
            start: 100
        })
    ));
    assert!(!output.path().join("file_to_plot.txt").exists());
}

#[test]
fn test_malformed_report_names_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());
    fs::write(input.path().join("ecoli_batch.txt"), "no queries here\n").unwrap();

    let err = run(&config(input.path(), output.path())).unwrap_err();
    assert!(err.to_string().contains("ecoli_batch.txt"));
}

#[test]
fn test_gzipped_inputs() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_fixture(input.path());

    fs::remove_file(input.path().join("ecoli.fasta")).unwrap();
    let mut encoder = GzEncoder::new(
        fs::File::create(input.path().join("ecoli.fasta.gz")).unwrap(),
        Compression::default(),
    );
    encoder.write_all(GENOME.as_bytes()).unwrap();
    encoder.finish().unwrap();

    run(&config(input.path(), output.path())).unwrap();
    let table = fs::read_to_string(output.path().join("file_to_plot.txt")).unwrap();
    assert!(table.ends_with(GENOME));
}
