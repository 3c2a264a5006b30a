use crate::domain::model::{ExportFormat, Record};
use crate::domain::schema::Schema;
use crate::utils::error::Result;

/// Where export artifacts end up.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Returns the location the data was written to.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// Export settings the exporter needs, independent of where they came from.
pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn formats(&self) -> &[ExportFormat];
    fn file_name(&self, format: ExportFormat) -> String;
    fn allow_empty_export(&self) -> bool;
    fn include_descriptions(&self) -> bool;
}

/// Turns a staged-rows snapshot into the bytes of one artifact.
pub trait Encoder {
    fn encode(&self, records: &[Record], schema: &Schema) -> Result<Vec<u8>>;
}
