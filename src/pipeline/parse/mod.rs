mod fit;
mod json;

pub use fit::FitRecordSource;
pub use json::JsonRecordSource;

use crate::error::ParseError;
use crate::types::activity::{FileFormat, RawRecord};

/// Decodes an activity file into its data records, in file order.
pub trait RecordSource {
    fn records(&self, bytes: &[u8]) -> Result<Vec<RawRecord>, ParseError>;
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Vec<RawRecord>, ParseError> {
    match format {
        FileFormat::Fit => FitRecordSource.records(bytes),
        FileFormat::Json => JsonRecordSource.records(bytes),
    }
}
