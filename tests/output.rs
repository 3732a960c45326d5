use std::path::PathBuf;

use chrono::{Duration, TimeZone, Utc};
use runviz_rs::output::{summary_json, write_outputs, SUMMARY_FILE};
use runviz_rs::types::activity::{FieldValue, RawRecord};
use runviz_rs::types::chart::OutputFormat;
use runviz_rs::{analyze_records, Analysis, AnalysisConfig, Config};

fn analysis() -> Analysis {
    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 7, 0, 0)
        .single()
        .expect("valid start time");
    let records: Vec<RawRecord> = (0..30)
        .map(|i| {
            RawRecord::new()
                .with("timestamp", FieldValue::Timestamp(start + Duration::seconds(i * 10)))
                .with("heart_rate", FieldValue::Number(110.0 + i as f64))
                .with("speed", FieldValue::Number(3.0))
        })
        .collect();
    analyze_records(&records, &AnalysisConfig::default()).expect("analysis")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("runviz-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn config(out_dir: PathBuf, render_charts: bool) -> Config {
    Config {
        out_dir,
        output_format: OutputFormat::Svg,
        render_charts,
        ..Config::from_env()
    }
}

#[test]
fn summary_is_written_when_charts_are_disabled() {
    let dir = scratch_dir("no-charts");
    let written = write_outputs(&analysis(), &config(dir.clone(), false)).expect("outputs");

    assert_eq!(written, vec![dir.join(SUMMARY_FILE)]);
    let text = std::fs::read_to_string(dir.join(SUMMARY_FILE)).expect("summary file");
    let json: serde_json::Value = serde_json::from_str(&text).expect("summary is JSON");
    assert!(json.get("zone_minutes").is_some());
    assert!(json.get("summary").is_some());
    assert!(!dir.join("activity.svg").exists());
    assert!(!dir.join("zones.svg").exists());

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn charts_are_written_next_to_the_summary() {
    let dir = scratch_dir("charts");
    let written = write_outputs(&analysis(), &config(dir.clone(), true)).expect("outputs");

    assert_eq!(written.len(), 3);
    assert!(dir.join(SUMMARY_FILE).exists());
    assert!(dir.join("activity.svg").exists());
    assert!(dir.join("zones.svg").exists());

    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn summary_json_reports_zone_minutes() {
    let analysis = analysis();
    let json: serde_json::Value =
        serde_json::from_str(&summary_json(&analysis).expect("serialise")).expect("parse");

    let zones = json["zone_minutes"].as_object().expect("zone map");
    let total: f64 = zones.values().filter_map(|v| v.as_f64()).sum();
    let elapsed = analysis.samples.last().expect("samples").elapsed_min;
    assert!((total - elapsed).abs() < 1e-9);
}
