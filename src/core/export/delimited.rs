use crate::core::{Encoder, Record, Schema};
use crate::utils::error::{EntryError, Result};

/// Header row of field names, then one row per record, minimal quoting.
pub fn encode_delimited(records: &[Record], schema: &Schema, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(schema.names())?;
    for record in records {
        writer.write_record(row_values(record, schema))?;
    }

    writer
        .into_inner()
        .map_err(|e| EntryError::IoError(e.into_error()))
}

/// Cell strings for `record` in schema column order.
pub fn row_values(record: &Record, schema: &Schema) -> Vec<String> {
    schema
        .names()
        .map(|name| record.get(name).map(ToString::to_string).unwrap_or_default())
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct DelimitedEncoder {
    delimiter: u8,
}

impl DelimitedEncoder {
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Encoder for DelimitedEncoder {
    fn encode(&self, records: &[Record], schema: &Schema) -> Result<Vec<u8>> {
        encode_delimited(records, schema, self.delimiter)
    }
}
