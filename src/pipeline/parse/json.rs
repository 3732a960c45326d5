use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ParseError;
use crate::pipeline::parse::RecordSource;
use crate::types::activity::{FieldValue, RawRecord};

const TIMESTAMP_FIELD: &str = "timestamp";

/// Reads a JSON array of flat record objects, e.g. a dump of decoded FIT records:
/// `[{"timestamp": "2024-05-01T07:00:00Z", "heart_rate": 120, "speed": 2.8}, ...]`
pub struct JsonRecordSource;

impl RecordSource for JsonRecordSource {
    fn records(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, ParseError> {
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let Value::Array(items) = document else {
            return Err(ParseError::InvalidJson(
                "expected a top-level array of records".to_string(),
            ));
        };

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(object) => {
                    let mut record = RawRecord::new();
                    for (name, value) in object {
                        let value = field_value(&name, value);
                        record.push(&name, value);
                    }
                    Ok(record)
                }
                _ => Err(ParseError::InvalidJson(format!(
                    "record {} is not an object",
                    idx
                ))),
            })
            .collect()
    }
}

fn field_value(name: &str, value: Value) -> FieldValue {
    match value {
        Value::Number(number) => number
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Other),
        Value::String(text) if name == TIMESTAMP_FIELD => text
            .parse::<DateTime<Utc>>()
            .map(FieldValue::Timestamp)
            .unwrap_or(FieldValue::Text(text)),
        Value::String(text) => FieldValue::Text(text),
        _ => FieldValue::Other,
    }
}
