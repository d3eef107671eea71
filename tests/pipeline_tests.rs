//! End-to-end tests over real CSV files.
//!
//! Covers partitioning (both sizing strategies, schema checks), the full
//! pipeline run (exclusions, identifier continuity across records and
//! partitions), and per-record recovery from segmenter failures.

use std::fs;
use std::path::Path;

use notepack::{
    partition, Error, NotePipeline, PartitionSizing, PipelineConfig, SegmentError, Segmenter,
    UnicodeSegmenter,
};

fn write_csv(path: &Path, rows: &[(&str, &str)]) {
    let mut out = String::from("record_id,text\n");
    for (id, text) in rows {
        out.push_str(&format!("{id},\"{text}\"\n"));
    }
    fs::write(path, out).unwrap();
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(ToOwned::to_owned).collect())
        .collect()
}

// =============================================================================
// Partitioner
// =============================================================================

#[test]
fn even_sizing_spreads_rows_across_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    let rows: Vec<(String, String)> = (0..7)
        .map(|i| (format!("r{i}"), format!("note number {i} with enough text")))
        .collect();
    let row_refs: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    write_csv(&input, &row_refs);

    let config = PipelineConfig::new().with_partition_count(3).unwrap();
    let set = partition(&input, dir.path(), "part", &config).unwrap();

    assert_eq!(set.total_records, 7);
    assert_eq!(set.dropped_records, 0);
    assert_eq!(set.paths.len(), 3);

    // ceil(7 / 3) = 3: windows of 3, 3, 1.
    let sizes: Vec<usize> = set.paths.iter().map(|p| read_rows(p).len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    // Source order preserved across partition boundaries.
    let all: Vec<String> = set
        .paths
        .iter()
        .flat_map(|p| read_rows(p))
        .map(|row| row[0].clone())
        .collect();
    let expected: Vec<String> = (0..7).map(|i| format!("r{i}")).collect();
    assert_eq!(all, expected);
}

#[test]
fn single_dominant_sizing_puts_everything_in_partition_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(
        &input,
        &[("a", "first note text"), ("b", "second note text"), ("c", "third note text")],
    );

    let config = PipelineConfig::new()
        .with_partition_count(3)
        .unwrap()
        .with_sizing(PartitionSizing::SingleDominant);
    let set = partition(&input, dir.path(), "part", &config).unwrap();

    let sizes: Vec<usize> = set.paths.iter().map(|p| read_rows(p).len()).collect();
    assert_eq!(sizes, vec![3, 0, 0]);
    assert_eq!(set.dropped_records, 0);
}

#[test]
fn partitions_carry_the_source_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(&input, &[("a", "some note text here")]);

    let config = PipelineConfig::new().with_partition_count(2).unwrap();
    let set = partition(&input, dir.path(), "part", &config).unwrap();

    for path in &set.paths {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers: Vec<&str> = reader.headers().unwrap().iter().collect();
        assert_eq!(headers, vec!["record_id", "text"]);
    }
}

#[test]
fn missing_column_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    fs::write(&input, "record_id,body\na,\"hello there\"\n").unwrap();

    let config = PipelineConfig::new();
    let err = partition(&input, dir.path(), "part", &config).unwrap_err();
    match err {
        Error::SchemaError { column } => assert_eq!(column, "text"),
        other => panic!("expected SchemaError, got {other}"),
    }
}

#[test]
fn empty_source_yields_empty_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    fs::write(&input, "record_id,text\n").unwrap();

    let config = PipelineConfig::new().with_partition_count(2).unwrap();
    let set = partition(&input, dir.path(), "part", &config).unwrap();

    assert_eq!(set.total_records, 0);
    assert_eq!(set.paths.len(), 2);
    for path in &set.paths {
        assert!(read_rows(path).is_empty());
    }
}

// =============================================================================
// Full pipeline
// =============================================================================

#[test]
fn run_emits_strictly_increasing_ids_across_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    // Ceiling 3 with two 3-word sentences per record forces 2 blocks each.
    write_csv(
        &input,
        &[
            ("note-1", "one two three. four five six."),
            ("note-2", "seven eight nine. ten eleven twelve."),
        ],
    );
    let output = dir.path().join("blocks.csv");

    let config = PipelineConfig::new().with_token_ceiling(3).unwrap();
    let mut pipeline = NotePipeline::new(&UnicodeSegmenter, config);
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.excluded, 0);
    assert_eq!(summary.blocks_emitted, 4);

    let rows = read_rows(&output);
    let ids: Vec<u64> = rows.iter().map(|r| r[1].parse().unwrap()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    // Attribution: first two blocks belong to note-1, last two to note-2.
    let owners: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(owners, vec!["note-1", "note-1", "note-2", "note-2"]);
}

#[test]
fn short_and_empty_records_are_excluded_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(
        &input,
        &[
            ("short", "ok"),
            ("empty", ""),
            ("kept", "patient resting comfortably. vitals stable."),
        ],
    );
    let output = dir.path().join("blocks.csv");

    let mut pipeline = NotePipeline::new(&UnicodeSegmenter, PipelineConfig::new());
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.excluded, 2);
    assert_eq!(summary.failed, 0);

    let rows = read_rows(&output);
    assert!(rows.iter().all(|r| r[0] == "kept"));
}

#[test]
fn normalization_is_applied_to_output_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(&input, &[("n1", "Pt c/o   pain!!!  Improving daily.")]);
    let output = dir.path().join("blocks.csv");

    let mut pipeline = NotePipeline::new(&UnicodeSegmenter, PipelineConfig::new());
    pipeline.run(&input, dir.path(), "part", &output).unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "pt c/o pain improving daily.");
}

#[test]
fn id_space_continues_across_partitions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    let rows: Vec<(String, String)> = (0..4)
        .map(|i| (format!("r{i}"), format!("record {i} has a full sentence here.")))
        .collect();
    let row_refs: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    write_csv(&input, &row_refs);
    let output = dir.path().join("blocks.csv");

    let config = PipelineConfig::new().with_partition_count(2).unwrap();
    let mut pipeline = NotePipeline::new(&UnicodeSegmenter, config);
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.processed, 4);
    let ids: Vec<u64> = read_rows(&output)
        .iter()
        .map(|r| r[1].parse().unwrap())
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(pipeline.next_block_id(), 4);
}

#[test]
fn injected_start_id_offsets_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(&input, &[("r0", "a complete sentence of text.")]);
    let output = dir.path().join("blocks.csv");

    let mut pipeline =
        NotePipeline::with_start_id(&UnicodeSegmenter, PipelineConfig::new(), 500);
    pipeline.run(&input, dir.path(), "part", &output).unwrap();

    let ids: Vec<u64> = read_rows(&output)
        .iter()
        .map(|r| r[1].parse().unwrap())
        .collect();
    assert_eq!(ids, vec![500]);
}

#[test]
fn custom_column_names_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    fs::write(
        &input,
        "note_id,note_text\nn1,\"the note body goes here.\"\n",
    )
    .unwrap();
    let output = dir.path().join("blocks.csv");

    let config = PipelineConfig::new().with_columns("note_id", "note_text");
    let mut pipeline = NotePipeline::new(&UnicodeSegmenter, config);
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(read_rows(&output)[0][0], "n1");
}

// =============================================================================
// Segmenter failure recovery
// =============================================================================

struct FailingSegmenter;

impl Segmenter for FailingSegmenter {
    fn segment(&self, _text: &str) -> Result<Vec<String>, SegmentError> {
        Err(SegmentError("malformed input".to_string()))
    }
}

/// Fails on texts mentioning a marker word, succeeds otherwise.
struct FlakySegmenter;

impl Segmenter for FlakySegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SegmentError> {
        if text.contains("poison") {
            return Err(SegmentError("poisoned record".to_string()));
        }
        UnicodeSegmenter.segment(text)
    }
}

#[test]
fn segmenter_failure_is_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(
        &input,
        &[
            ("bad", "this record is poison for the segmenter."),
            ("good", "this record segments without trouble."),
        ],
    );
    let output = dir.path().join("blocks.csv");

    let mut pipeline = NotePipeline::new(&FlakySegmenter, PipelineConfig::new());
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 1);
    let rows = read_rows(&output);
    assert!(rows.iter().all(|r| r[0] == "good"));
}

#[test]
fn all_records_failing_still_completes_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    write_csv(&input, &[("a", "some note text here."), ("b", "another note text here.")]);
    let output = dir.path().join("blocks.csv");

    let mut pipeline = NotePipeline::new(&FailingSegmenter, PipelineConfig::new());
    let summary = pipeline.run(&input, dir.path(), "part", &output).unwrap();

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.blocks_emitted, 0);
    assert!(read_rows(&output).is_empty());
}
