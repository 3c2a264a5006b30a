//! Two-sheet workbook export: `Master` rows plus a `DataDictionary`.

use crate::core::{Encoder, Record, Schema, Value};
use crate::utils::error::Result;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, FormatAlign, Workbook, Worksheet};

pub const MASTER_SHEET: &str = "Master";
pub const DICTIONARY_SHEET: &str = "DataDictionary";

const NUMBER_FORMAT: &str = "0.00";

/// Excel refuses cells holding more characters than this.
pub const MAX_CELL_CHARS: usize = 32_767;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetOptions {
    /// Add `Type` and `Description` columns to the data dictionary.
    pub include_descriptions: bool,
}

pub fn encode_spreadsheet(
    records: &[Record],
    schema: &Schema,
    options: SpreadsheetOptions,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // pin the creation timestamp so identical input gives identical bytes
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let fmt_header = Format::new().set_bold().set_align(FormatAlign::Center);
    let fmt_number = Format::new().set_num_format(NUMBER_FORMAT);

    let master = workbook.add_worksheet();
    master.set_name(MASTER_SHEET)?;
    write_master(master, records, schema, &fmt_header, &fmt_number)?;

    let dictionary = workbook.add_worksheet();
    dictionary.set_name(DICTIONARY_SHEET)?;
    write_dictionary(dictionary, schema, options, &fmt_header)?;

    tracing::debug!(
        "Encoded workbook with {} master rows and {} dictionary rows",
        records.len(),
        schema.len()
    );
    Ok(workbook.save_to_buffer()?)
}

fn write_master(
    sheet: &mut Worksheet,
    records: &[Record],
    schema: &Schema,
    fmt_header: &Format,
    fmt_number: &Format,
) -> Result<()> {
    for (col, name) in schema.names().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, fmt_header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, name) in schema.names().enumerate() {
            let col = col as u16;
            match record.get(name) {
                Some(Value::Number(n)) => {
                    sheet.write_number_with_format(row, col, *n, fmt_number)?;
                }
                Some(value) => {
                    let text = value.to_string();
                    if !text.is_empty() {
                        sheet.write_string(row, col, fit_cell(name, idx, &text))?;
                    }
                }
                None => {}
            }
        }
    }

    sheet.autofit();
    Ok(())
}

/// Cut `text` to the cell limit on a char boundary.
fn fit_cell<'a>(field: &str, idx: usize, text: &'a str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            tracing::warn!(
                "Truncating '{}' in row {} to {} characters for the workbook",
                field,
                idx + 1,
                MAX_CELL_CHARS
            );
            &text[..end]
        }
        None => text,
    }
}

fn write_dictionary(
    sheet: &mut Worksheet,
    schema: &Schema,
    options: SpreadsheetOptions,
    fmt_header: &Format,
) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Field", fmt_header)?;
    if options.include_descriptions {
        sheet.write_string_with_format(0, 1, "Type", fmt_header)?;
        sheet.write_string_with_format(0, 2, "Description", fmt_header)?;
    }

    for (idx, field) in schema.fields().iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &field.name)?;
        if options.include_descriptions {
            sheet.write_string(row, 1, field.kind.tag())?;
            if let Some(description) = &field.description {
                sheet.write_string(row, 2, description)?;
            }
        }
    }

    sheet.autofit();
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetEncoder {
    pub options: SpreadsheetOptions,
}

impl Encoder for SpreadsheetEncoder {
    fn encode(&self, records: &[Record], schema: &Schema) -> Result<Vec<u8>> {
        encode_spreadsheet(records, schema, self.options)
    }
}
