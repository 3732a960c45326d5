use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::AppError;
use crate::pipeline::{derive, parse, series, zones};
use crate::types::activity::{ActivitySummary, DerivedSample, FileFormat, RawRecord};
use crate::types::zone::{ZoneTable, ZoneTimeTotals};

/// Everything the chart layer needs from one activity.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub samples: Vec<DerivedSample>,
    pub zone_labels: Vec<&'static str>,
    pub zone_totals: ZoneTimeTotals,
    pub summary: ActivitySummary,
    pub dropped_records: usize,
    pub hr_max: f64,
    #[serde(skip)]
    pub zone_table: ZoneTable,
}

pub fn analyze_bytes(
    bytes: &[u8],
    format: FileFormat,
    config: &AnalysisConfig,
) -> Result<Analysis, AppError> {
    let records = parse::parse(bytes, format)?;
    analyze_records(&records, config)
}

pub fn analyze_records(
    records: &[RawRecord],
    config: &AnalysisConfig,
) -> Result<Analysis, AppError> {
    let report = series::build_series_report(records)?;
    let samples = derive::derive_metrics(&report.series, config)?;
    let summary = derive::summarize(&samples)?;
    let zone_report = zones::classify_derived(&samples, &config.zones);

    tracing::info!(
        "Analysed {} samples over {:.1} min, avg HR {:.0} bpm",
        summary.sample_count,
        summary.duration_min,
        summary.avg_heart_rate
    );

    Ok(Analysis {
        samples,
        zone_labels: zone_report.labels,
        zone_totals: zone_report.totals,
        summary,
        dropped_records: report.dropped,
        hr_max: config.hr_max,
        zone_table: config.zones.clone(),
    })
}
