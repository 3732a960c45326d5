use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single decoded field value, as handed over by a record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Timestamp(DateTime<Utc>),
    Number(f64),
    Text(String),
    Other,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(val) if val.is_finite() => Some(*val),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(val) => Some(*val),
            _ => None,
        }
    }
}

/// One "record" message of an activity file, fields in decode order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: FieldValue) {
        self.fields.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FileFormat {
    Fit,
    Json,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "fit" => Some(FileFormat::Fit),
            "json" => Some(FileFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Beats per minute.
    pub heart_rate: f64,
    /// Metres per second.
    pub speed: f64,
}

/// Samples in source order. Never empty once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedSample {
    pub timestamp: DateTime<Utc>,
    pub heart_rate: f64,
    pub speed: f64,
    pub elapsed_min: f64,
    /// `None` while stationary (speed <= 0).
    pub pace_min_per_km: Option<f64>,
    pub smoothed_hr: f64,
    pub hr_pct_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub sample_count: usize,
    pub duration_min: f64,
    pub distance_km: f64,
    pub avg_heart_rate: f64,
    pub max_heart_rate: f64,
    pub avg_speed_ms: f64,
    pub avg_pace_min_per_km: Option<f64>,
    pub stationary_samples: usize,
}
