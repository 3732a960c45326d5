use runviz_rs::error::{AppError, ParseError, ProcessError};
use runviz_rs::pipeline::parse::{parse, FitRecordSource, JsonRecordSource, RecordSource};
use runviz_rs::types::activity::{FieldValue, FileFormat};
use runviz_rs::{analyze_bytes, AnalysisConfig};

fn sample_json() -> &'static str {
    r#"[
  {"timestamp": "2024-05-01T07:00:00Z", "heart_rate": 98, "speed": 2.5, "cadence": 80},
  {"timestamp": "2024-05-01T07:01:00Z", "heart_rate": 130, "enhanced_speed": 3.0},
  {"timestamp": "2024-05-01T07:02:00Z", "heart_rate": 131},
  {"timestamp": "2024-05-01T07:03:00Z", "heart_rate": 150, "speed": 0.0, "event": "pause"}
]"#
}

#[test]
fn json_records_keep_types() {
    let records = JsonRecordSource.records(sample_json().as_bytes()).expect("records");
    assert_eq!(records.len(), 4);

    let first = &records[0];
    assert!(matches!(first.get("timestamp"), Some(FieldValue::Timestamp(_))));
    assert_eq!(first.get("heart_rate"), Some(&FieldValue::Number(98.0)));
    assert_eq!(
        records[3].get("event"),
        Some(&FieldValue::Text("pause".to_string()))
    );
}

#[test]
fn json_must_be_an_array_of_objects() {
    let err = JsonRecordSource.records(br#"{"timestamp": 1}"#).expect_err("not an array");
    assert!(matches!(err, ParseError::InvalidJson(_)));

    let err = JsonRecordSource.records(b"[1, 2]").expect_err("not objects");
    assert!(matches!(err, ParseError::InvalidJson(_)));

    let err = JsonRecordSource.records(b"not json").expect_err("garbage");
    assert!(matches!(err, ParseError::InvalidJson(_)));
}

#[test]
fn garbage_fit_bytes_are_a_decode_error() {
    let err = FitRecordSource
        .records(b"definitely not a FIT file")
        .expect_err("decode must fail");
    assert!(matches!(err, ParseError::InvalidFit(_)));

    let err = parse(b"0123456789abcdef", FileFormat::Fit).expect_err("no FIT signature");
    assert!(matches!(err, ParseError::InvalidFit(_)));
}

#[test]
fn file_format_follows_extension() {
    assert!(matches!(FileFormat::from_filename("run.FIT"), Some(FileFormat::Fit)));
    assert!(matches!(FileFormat::from_filename("dump.json"), Some(FileFormat::Json)));
    assert!(FileFormat::from_filename("ride.gpx").is_none());
}

#[test]
fn analysis_of_json_dump_runs_the_whole_pipeline() {
    let analysis = analyze_bytes(sample_json().as_bytes(), FileFormat::Json, &AnalysisConfig::default())
        .expect("analysis");

    assert_eq!(analysis.samples.len(), 3);
    assert_eq!(analysis.dropped_records, 1);
    assert_eq!(analysis.samples[1].speed, 3.0);
    assert_eq!(analysis.samples[2].pace_min_per_km, None);
    assert_eq!(analysis.zone_labels.len(), 3);
    assert!((analysis.zone_totals.total_minutes() - analysis.samples[2].elapsed_min).abs() < 1e-9);
    assert!((analysis.summary.duration_min - 3.0).abs() < 1e-9);
}

#[test]
fn empty_dump_is_empty_series() {
    let err = analyze_bytes(b"[]", FileFormat::Json, &AnalysisConfig::default())
        .expect_err("nothing to analyse");
    assert!(matches!(err, AppError::Process(ProcessError::EmptySeries)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn decode_errors_surface_through_analysis() {
    let err = analyze_bytes(b"0123456789abcdef-not-fit", FileFormat::Fit, &AnalysisConfig::default())
        .expect_err("not a FIT file");
    assert!(matches!(err, AppError::Parse(ParseError::InvalidFit(_))));
}
