use chrono::{Duration, TimeZone, Utc};
use runviz_rs::error::{ConfigError, RenderError};
use runviz_rs::pipeline::{rasterize, render};
use runviz_rs::types::activity::{FieldValue, RawRecord};
use runviz_rs::types::chart::{ChartOptions, OutputConfig};
use runviz_rs::{analyze_records, Analysis, AnalysisConfig};

fn analysis() -> Analysis {
    let start = Utc
        .with_ymd_and_hms(2024, 5, 1, 7, 0, 0)
        .single()
        .expect("valid start time");
    let records: Vec<RawRecord> = (0..120)
        .map(|i| {
            let heart_rate = 100.0 + (i as f64 * 0.6);
            let speed = if (40..45).contains(&i) { 0.0 } else { 2.8 + (i % 7) as f64 * 0.1 };
            RawRecord::new()
                .with("timestamp", FieldValue::Timestamp(start + Duration::seconds(i * 5)))
                .with("heart_rate", FieldValue::Number(heart_rate))
                .with("speed", FieldValue::Number(speed))
        })
        .collect();
    analyze_records(&records, &AnalysisConfig::default()).expect("analysis")
}

fn options() -> ChartOptions {
    ChartOptions::new(800, 480).expect("chart options")
}

#[test]
fn activity_chart_draws_heart_rate_pace_and_zone_bands() {
    let svg = render::render_activity_chart(&analysis(), &options()).expect("svg");

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Heart rate (bpm)"));
    assert!(svg.contains("Pace (min/km)"));
    assert!(svg.contains(r##"fill="#4CAF50""##), "zone 3 band is drawn");
    // The stationary stretch splits the pace line into two sub-paths.
    let pace_path = svg
        .lines()
        .find(|line| line.contains("<path") && line.contains(r##"stroke="#1E88E5""##))
        .expect("pace path");
    assert_eq!(pace_path.matches('M').count(), 2);
}

#[test]
fn zone_chart_lists_every_zone() {
    let analysis = analysis();
    let svg = render::render_zone_chart(&analysis, &options()).expect("svg");
    for zone in analysis.zone_table.zones() {
        assert!(svg.contains(&zone.label.replace('<', "&lt;")), "{}", zone.label);
    }
    assert!(svg.contains("Time in heart-rate zone"));
}

#[test]
fn padding_larger_than_chart_is_rejected() {
    let mut options = options();
    options.padding = 500;
    let err = render::render_activity_chart(&analysis(), &options).expect_err("no room");
    assert!(matches!(err, RenderError::InvalidViewport(_)));
}

#[test]
fn chart_dimensions_are_bounded() {
    assert!(matches!(
        ChartOptions::new(100, 480),
        Err(ConfigError::InvalidDimensions(100, 480))
    ));
    assert!(ChartOptions::new(4096, 4096).is_ok());
}

#[test]
fn rasterized_chart_is_png() {
    let options = options();
    let svg = render::render_zone_chart(&analysis(), &options).expect("svg");
    let png = rasterize::rasterize(&svg, &OutputConfig::for_chart(&options)).expect("png");
    assert_eq!(&png[..4], b"\x89PNG");
}
