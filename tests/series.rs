use chrono::{DateTime, Duration, TimeZone, Utc};
use runviz_rs::error::ProcessError;
use runviz_rs::pipeline::series::{build_series, build_series_report};
use runviz_rs::types::activity::{FieldValue, RawRecord};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).single().expect("valid start time")
}

fn record(offset_s: i64, heart_rate: f64, speed: f64) -> RawRecord {
    RawRecord::new()
        .with("timestamp", FieldValue::Timestamp(start() + Duration::seconds(offset_s)))
        .with("heart_rate", FieldValue::Number(heart_rate))
        .with("speed", FieldValue::Number(speed))
}

#[test]
fn empty_record_list_is_empty_series() {
    let err = build_series(&[]).expect_err("no records must fail");
    assert!(matches!(err, ProcessError::EmptySeries));
}

#[test]
fn all_records_incomplete_is_empty_series() {
    let records = vec![
        RawRecord::new().with("heart_rate", FieldValue::Number(120.0)),
        RawRecord::new()
            .with("timestamp", FieldValue::Timestamp(start()))
            .with("speed", FieldValue::Number(3.0)),
    ];
    let err = build_series(&records).expect_err("nothing conforms");
    assert!(matches!(err, ProcessError::EmptySeries));
}

#[test]
fn incomplete_records_are_dropped_and_counted() {
    let records = vec![
        record(0, 120.0, 3.0),
        RawRecord::new()
            .with("timestamp", FieldValue::Timestamp(start() + Duration::seconds(1)))
            .with("speed", FieldValue::Number(3.1)),
        record(2, 122.0, 3.2),
    ];

    let report = build_series_report(&records).expect("series");
    assert_eq!(report.dropped, 1);
    assert_eq!(report.series.samples.len(), 2);
    assert_eq!(report.series.samples[1].heart_rate, 122.0);
}

#[test]
fn enhanced_speed_is_accepted_as_speed() {
    let records = vec![RawRecord::new()
        .with("timestamp", FieldValue::Timestamp(start()))
        .with("heart_rate", FieldValue::Number(130.0))
        .with("enhanced_speed", FieldValue::Number(2.75))];

    let series = build_series(&records).expect("series");
    assert_eq!(series.samples[0].speed, 2.75);
}

#[test]
fn plain_speed_wins_over_enhanced_speed() {
    let records = vec![RawRecord::new()
        .with("timestamp", FieldValue::Timestamp(start()))
        .with("heart_rate", FieldValue::Number(130.0))
        .with("enhanced_speed", FieldValue::Number(2.751))
        .with("speed", FieldValue::Number(2.75))];

    let series = build_series(&records).expect("series");
    assert_eq!(series.samples[0].speed, 2.75);
}

#[test]
fn malformed_values_count_as_missing() {
    let records = vec![
        RawRecord::new()
            .with("timestamp", FieldValue::Timestamp(start()))
            .with("heart_rate", FieldValue::Text("high".to_string()))
            .with("speed", FieldValue::Number(3.0)),
        RawRecord::new()
            .with("timestamp", FieldValue::Text("2024-05-01".to_string()))
            .with("heart_rate", FieldValue::Number(120.0))
            .with("speed", FieldValue::Number(3.0)),
        RawRecord::new()
            .with("timestamp", FieldValue::Timestamp(start()))
            .with("heart_rate", FieldValue::Number(f64::NAN))
            .with("speed", FieldValue::Number(3.0)),
        record(5, 125.0, 3.0),
    ];

    let report = build_series_report(&records).expect("series");
    assert_eq!(report.dropped, 3);
    assert_eq!(report.series.samples.len(), 1);
}

#[test]
fn source_order_is_kept_even_when_time_goes_backwards() {
    let records = vec![record(10, 120.0, 3.0), record(5, 121.0, 3.0), record(20, 122.0, 3.0)];

    let series = build_series(&records).expect("series");
    let heart_rates: Vec<f64> = series.samples.iter().map(|s| s.heart_rate).collect();
    assert_eq!(heart_rates, vec![120.0, 121.0, 122.0]);
}

#[test]
fn unrelated_fields_are_ignored() {
    let records = vec![record(0, 140.0, 3.3)
        .with("cadence", FieldValue::Number(88.0))
        .with("device", FieldValue::Text("watch".to_string()))
        .with("position_lat", FieldValue::Other)];

    let series = build_series(&records).expect("series");
    assert_eq!(series.samples.len(), 1);
    assert_eq!(series.samples[0].speed, 3.3);
}
