//! End-to-end tests for the conversion pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use sleeplog_cli::pipeline::{
    ConvertRequest, convert, read_segment_file, resolve_segments, write_segment_file,
};
use sleeplog_model::{DiagnosticKind, ReshapeOptions, SegmentList};
use sleeplog_output::OutputLayout;

const DIARY: &str = "SUBJECT,Out_Bed,In_Bed\n\
AK/01,10/03/25 07:15,10/02/25 22:45\n\
AK/01,10/04/25 06:50,10/04/25 00:30\n\
AK/01,10/05/25 07:05,10/04/25 23:20\n";

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "sleeplog-cli-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn legacy_segment_file_converts_to_ggir_layout() {
    let dir = unique_temp_dir("ggir");
    let diary = dir.join("diary.csv");
    let segments = dir.join("segments.json");
    write(&diary, DIARY);
    write(
        &segments,
        r#"[
  {"id": "AK/2509081926_1.GT3X", "start_date": "2025-10-02", "end_date": "2025-10-03"},
  {"id": "AK/2509081926_2.GT3X", "start_date": "2025-10-04", "end_date": "2025-10-04"}
]"#,
    );

    let mut request = ConvertRequest::new(&diary);
    request.segments = Some(segments);
    request.layout = OutputLayout::GgirAdvanced;
    let outcome = convert(&request).expect("convert");

    let output = outcome.output_path.expect("output written");
    assert_eq!(output, dir.join("AK01_sleeplog_advanced.csv"));
    let csv = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    ID,D1_date,D1_wakeup,D1_inbed,D2_date,D2_wakeup,D2_inbed
    AK/2509081926_1.GT3X,2025-10-02,,22:45:00,2025-10-03,07:15:00,00:30:00
    AK/2509081926_2.GT3X,2025-10-04,06:50:00,23:20:00,,,
    ");
    assert!(outcome.reshaped.diagnostics.is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_segments_default_to_whole_diary() {
    let dir = unique_temp_dir("defaults");
    let diary = dir.join("diary.csv");
    write(&diary, DIARY);

    let mut request = ConvertRequest::new(&diary);
    request.output_dir = Some(dir.join("out"));
    let outcome = convert(&request).expect("convert");

    assert_eq!(outcome.segments.len(), 1);
    assert_eq!(outcome.reshaped.width, 3);
    assert_eq!(outcome.table.headers.len(), 2 + 3 * 2);
    assert_eq!(
        outcome.table.rows[0][..4],
        ["AK01", "AK/01", "2025-10-02T22:45", "2025-10-03T07:15"]
    );
    assert!(dir.join("out").join("AK01_sleeplog_advanced.csv").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_diary_writes_nothing() {
    let dir = unique_temp_dir("malformed");
    let diary = dir.join("diary.csv");
    write(
        &diary,
        "SUBJECT,Out_Bed,In_Bed\nA,2024-01-02T07:00,2024-01-01T23:00\nA,not a time,2024-01-02T23:00\n",
    );

    let error = convert(&ConvertRequest::new(&diary)).unwrap_err();
    assert!(format!("{error:#}").contains("line 3"), "{error:#}");
    assert!(!dir.join("A_sleeplog_advanced.csv").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dry_run_reports_diagnostics_without_output() {
    let dir = unique_temp_dir("dry-run");
    let diary = dir.join("diary.csv");
    let segments = dir.join("segments.json");
    write(&diary, "SUBJECT,Out_Bed,In_Bed\nA,2024-01-02T07:00,2024-01-01T23:00\n");
    write(
        &segments,
        r#"[
  {"recording_id": "R1", "subject_id": "A", "start_date": "2024-01-01", "end_date": "2024-01-01"},
  {"recording_id": "R2", "subject_id": "B", "start_date": "2024-01-01", "end_date": "2024-01-02"},
  {"recording_id": "R3", "subject_id": "A", "start_date": "2024-01-05", "end_date": "2024-01-01"}
]"#,
    );

    let mut request = ConvertRequest::new(&diary);
    request.segments = Some(segments);
    request.dry_run = true;
    let outcome = convert(&request).expect("convert");

    assert!(outcome.output_path.is_none());
    assert_eq!(outcome.reshaped.rows.len(), 2);
    assert_eq!(outcome.reshaped.width, 2);
    let kinds: Vec<&DiagnosticKind> = outcome
        .reshaped
        .diagnostics
        .iter()
        .map(|diagnostic| &diagnostic.kind)
        .collect();
    assert_eq!(kinds.len(), 2);
    assert_eq!(kinds[0], &DiagnosticKind::UnknownSubject);
    assert!(matches!(kinds[1], DiagnosticKind::InvalidSegment(_)));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn segment_file_round_trip() {
    let dir = unique_temp_dir("segments");
    let path = dir.join("segments.json");
    let list = SegmentList::from_json(
        r#"[{"recording_id": "R1", "subject_id": "A", "start_date": "2024-01-01", "end_date": "2024-01-07"}]"#,
    )
    .unwrap();

    write_segment_file(&path, &list).unwrap();
    assert_eq!(read_segment_file(&path).unwrap(), list);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn subjectless_segments_stay_empty_for_multi_subject_diaries() {
    let events = vec![
        sleeplog_model::SleepEvent {
            row: 2,
            subject_id: "A".to_string(),
            bed_time: chrono::NaiveDateTime::parse_from_str("2024-01-01 23:00", "%Y-%m-%d %H:%M")
                .unwrap(),
            wake_time: chrono::NaiveDateTime::parse_from_str("2024-01-02 07:00", "%Y-%m-%d %H:%M")
                .unwrap(),
        },
        sleeplog_model::SleepEvent {
            row: 3,
            subject_id: "B".to_string(),
            bed_time: chrono::NaiveDateTime::parse_from_str("2024-01-01 22:00", "%Y-%m-%d %H:%M")
                .unwrap(),
            wake_time: chrono::NaiveDateTime::parse_from_str("2024-01-02 06:00", "%Y-%m-%d %H:%M")
                .unwrap(),
        },
    ];
    let list = SegmentList::from_json(
        r#"[{"id": "R1", "start_date": "2024-01-01", "end_date": "2024-01-01"}]"#,
    )
    .unwrap();

    let resolved = resolve_segments(Some(list), &events, &ReshapeOptions::default());
    assert!(resolved.get(0).unwrap().subject_id.is_empty());
}
