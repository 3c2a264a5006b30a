use crate::core::export::delimited::DelimitedEncoder;
use crate::core::export::spreadsheet::{SpreadsheetEncoder, SpreadsheetOptions};
use crate::core::{Encoder, ExportFormat, Record, Schema};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Zip archive holding the workbook and the CSV side by side.
#[derive(Debug, Clone)]
pub struct BundleEncoder {
    pub spreadsheet: SpreadsheetOptions,
    pub xlsx_name: String,
    pub csv_name: String,
}

impl Default for BundleEncoder {
    fn default() -> Self {
        Self {
            spreadsheet: SpreadsheetOptions::default(),
            xlsx_name: ExportFormat::Xlsx.default_file_name(),
            csv_name: ExportFormat::Csv.default_file_name(),
        }
    }
}

impl Encoder for BundleEncoder {
    fn encode(&self, records: &[Record], schema: &Schema) -> Result<Vec<u8>> {
        let xlsx = SpreadsheetEncoder {
            options: self.spreadsheet,
        }
        .encode(records, schema)?;
        let csv = DelimitedEncoder::csv().encode(records, schema)?;

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        // the workbook is already deflated internally
        let stored = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .last_modified_time(zip::DateTime::default());
        let deflated = SimpleFileOptions::default().last_modified_time(zip::DateTime::default());

        zip.start_file(self.xlsx_name.as_str(), stored)?;
        zip.write_all(&xlsx)?;

        zip.start_file(self.csv_name.as_str(), deflated)?;
        zip.write_all(&csv)?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
