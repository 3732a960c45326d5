use chrono::Utc;
use fitparser::profile::MesgNum;
use fitparser::Value;

use crate::error::ParseError;
use crate::pipeline::parse::RecordSource;
use crate::types::activity::{FieldValue, RawRecord};

pub struct FitRecordSource;

impl RecordSource for FitRecordSource {
    fn records(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, ParseError> {
        let data = fitparser::from_bytes(bytes)
            .map_err(|e| ParseError::InvalidFit(format!("Failed to parse FIT file: {}", e)))?;

        let total_messages = data.len();
        let mut records = Vec::new();

        for message in data {
            if message.kind() != MesgNum::Record {
                continue;
            }

            let mut record = RawRecord::new();
            for field in message.fields() {
                record.push(field.name(), field_value(field.value()));
            }
            records.push(record);
        }

        tracing::debug!(
            "Decoded {} record messages out of {} FIT messages",
            records.len(),
            total_messages
        );

        Ok(records)
    }
}

fn field_value(value: &Value) -> FieldValue {
    match value {
        Value::Timestamp(ts) => FieldValue::Timestamp(ts.with_timezone(&Utc)),
        Value::String(text) => FieldValue::Text(text.clone()),
        other => fit_value_to_f64(other)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Other),
    }
}

fn fit_value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float32(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::SInt8(v) => Some(*v as f64),
        Value::UInt8(v) => Some(*v as f64),
        Value::UInt8z(v) => Some(*v as f64),
        Value::Byte(v) => Some(*v as f64),
        Value::SInt16(v) => Some(*v as f64),
        Value::UInt16(v) => Some(*v as f64),
        Value::UInt16z(v) => Some(*v as f64),
        Value::SInt32(v) => Some(*v as f64),
        Value::UInt32(v) => Some(*v as f64),
        Value::UInt32z(v) => Some(*v as f64),
        Value::SInt64(v) => Some(*v as f64),
        Value::UInt64(v) => Some(*v as f64),
        Value::UInt64z(v) => Some(*v as f64),
        Value::Array(values) => values.iter().find_map(fit_value_to_f64),
        _ => None,
    }
}
