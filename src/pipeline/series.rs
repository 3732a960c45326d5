use chrono::{DateTime, Utc};

use crate::error::ProcessError;
use crate::types::activity::{RawRecord, Sample, TimeSeries};

/// Canonical sample field and the record field names it may be stored under,
/// in order of preference. Older FIT profiles only carry `speed`; newer
/// devices may log `enhanced_speed` alone.
struct FieldAliases {
    canonical: &'static str,
    names: &'static [&'static str],
}

const TIMESTAMP: FieldAliases = FieldAliases {
    canonical: "timestamp",
    names: &["timestamp"],
};

const HEART_RATE: FieldAliases = FieldAliases {
    canonical: "heart_rate",
    names: &["heart_rate"],
};

const SPEED: FieldAliases = FieldAliases {
    canonical: "speed",
    names: &["speed", "enhanced_speed"],
};

impl FieldAliases {
    fn number(&self, record: &RawRecord) -> Option<f64> {
        self.names
            .iter()
            .find_map(|name| record.get(name).and_then(|value| value.as_number()))
    }

    fn timestamp(&self, record: &RawRecord) -> Option<DateTime<Utc>> {
        self.names
            .iter()
            .find_map(|name| record.get(name).and_then(|value| value.as_timestamp()))
    }
}

#[derive(Debug, Clone)]
pub struct SeriesReport {
    pub series: TimeSeries,
    /// Records dropped for lacking a usable timestamp, heart rate or speed.
    pub dropped: usize,
}

pub fn build_series(records: &[RawRecord]) -> Result<TimeSeries, ProcessError> {
    build_series_report(records).map(|report| report.series)
}

pub fn build_series_report(records: &[RawRecord]) -> Result<SeriesReport, ProcessError> {
    let mut samples: Vec<Sample> = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for (idx, record) in records.iter().enumerate() {
        let Some(sample) = extract_sample(record) else {
            dropped += 1;
            tracing::debug!("Dropping record {}: {}", idx, missing_fields(record).join(", "));
            continue;
        };

        if let Some(prev) = samples.last() {
            if sample.timestamp < prev.timestamp {
                tracing::warn!(
                    "Record {} goes back in time ({} < {}), keeping source order",
                    idx,
                    sample.timestamp,
                    prev.timestamp
                );
            }
        }

        samples.push(sample);
    }

    if samples.is_empty() {
        tracing::warn!("None of {} records carried a complete sample", records.len());
        return Err(ProcessError::EmptySeries);
    }

    tracing::info!(
        "Built series of {} samples ({} records dropped)",
        samples.len(),
        dropped
    );

    Ok(SeriesReport {
        series: TimeSeries { samples },
        dropped,
    })
}

fn extract_sample(record: &RawRecord) -> Option<Sample> {
    Some(Sample {
        timestamp: TIMESTAMP.timestamp(record)?,
        heart_rate: HEART_RATE.number(record)?,
        speed: SPEED.number(record)?,
    })
}

fn missing_fields(record: &RawRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if TIMESTAMP.timestamp(record).is_none() {
        missing.push(TIMESTAMP.canonical);
    }
    if HEART_RATE.number(record).is_none() {
        missing.push(HEART_RATE.canonical);
    }
    if SPEED.number(record).is_none() {
        missing.push(SPEED.canonical);
    }
    missing
}
