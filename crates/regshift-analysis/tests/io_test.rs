//! Record files in, run document out.

use std::io::Write;

use regshift_analysis::io::{read_records, to_json_pretty, write_report, write_report_file};
use regshift_analysis::{analyze, Granularity};
use regshift_core::config::RegshiftConfig;
use regshift_core::errors::{IngestError, RegshiftErrorCode};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn jsonl_and_array_files_feed_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let dep = write(
        &dir,
        "dependency.jsonl",
        concat!(
            "{\"pair_index\": 0, \"event_type\": \"tokens_removed\", \"lemma\": \"the\", \"upos\": \"DET\"}\n",
            "\n",
            "{\"pair_index\": \"1\", \"event_type\": \"tokens_removed\", \"lemma\": \"the\", \"upos\": \"DET\"}\n",
        ),
    );
    let cons = write(
        &dir,
        "constituency.json",
        r#"[{"pair_index": 0, "event_type": "word_removed", "word": "the", "tag": "DT", "tree_edit_distance": 3}]"#,
    );

    let dependency = read_records(&dep).unwrap();
    let constituency = read_records(&cons).unwrap();
    assert_eq!(dependency.len(), 2);
    assert_eq!(constituency.len(), 1);

    let report = analyze(&dependency, &constituency, &RegshiftConfig::default()).unwrap();
    assert_eq!(report.report(Granularity::Minimal).unwrap().total_patterns, 2);
    assert_eq!(report.distance.as_ref().unwrap().pairs, 1);

    let out = dir.path().join("report.json");
    write_report_file(&report, &out).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["reports"][0]["total_events"], 3);
    assert_eq!(written["dependency"]["accepted"], 2);
    assert_eq!(written["skipped"], serde_json::json!([]));

    let mut buf = Vec::new();
    write_report(&report, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.trim_end(), to_json_pretty(&report).unwrap());
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = read_records(&dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, IngestError::ReadFailed { .. }));
    assert_eq!(err.error_code(), "INGEST_ERROR");
}

#[test]
fn broken_line_names_its_position() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.jsonl", "{\"pair_index\": 0}\n{\"pair_index\": \n");
    match read_records(&path).unwrap_err() {
        IngestError::ParseFailed { line, .. } => assert_eq!(line, 2),
        other => panic!("expected ParseFailed, got {other:?}"),
    }
}

#[test]
fn unwritable_destination_is_an_output_error() {
    let dir = TempDir::new().unwrap();
    let report = analyze(&[], &[], &RegshiftConfig::default()).unwrap();
    let err = write_report_file(&report, &dir.path().join("no/such/dir/report.json")).unwrap_err();
    assert_eq!(err.error_code(), "OUTPUT_ERROR");
}
