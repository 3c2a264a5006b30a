use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Digits after the decimal point for number fields.
pub const NUMBER_DECIMALS: usize = 2;

/// Separator used when a multi-choice value is flattened to a single string.
pub const CHOICE_SEPARATOR: &str = ", ";

/// Unvalidated input for one field, as typed or picked by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Single(String),
    Multiple(Vec<String>),
    Number(f64),
    Flag(bool),
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Single(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Single(value)
    }
}

impl From<Vec<&str>> for RawInput {
    fn from(values: Vec<&str>) -> Self {
        RawInput::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

/// Raw form contents keyed by field name. Missing keys mean "left blank".
pub type RawForm = HashMap<String, RawInput>;

/// A normalized, typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(Option<NaiveDate>),
    /// Chosen option, empty when nothing was chosen.
    Choice(String),
    /// Chosen options in the order they were picked.
    Choices(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Choice(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{:.*}", NUMBER_DECIMALS, n),
            Value::Date(Some(d)) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Date(None) => Ok(()),
            Value::Choices(c) => f.write_str(&c.join(CHOICE_SEPARATOR)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) => serializer.serialize_f64(*n),
            other => serializer.collect_str(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub field: String,
    pub value: Value,
}

/// One staged employee entry: exactly one cell per schema field, in schema order.
///
/// Records are only built by normalization, which walks the schema; there is
/// no public way to add, remove or reorder cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    cells: Vec<Cell>,
}

impl Record {
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|c| c.field == field)
            .map(|c| &c.value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.field.as_str())
    }

    /// Canonical string rendering of every cell, in column order.
    pub fn normalized_values(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.value.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for cell in &self.cells {
            map.serialize_entry(&cell.field, &cell.value)?;
        }
        map.end()
    }
}

/// The downloadable artifacts an export can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Tsv,
    Json,
    /// Zip archive holding the xlsx and csv artifacts.
    Bundle,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Xlsx,
        ExportFormat::Csv,
        ExportFormat::Tsv,
        ExportFormat::Json,
        ExportFormat::Bundle,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
            ExportFormat::Bundle => "zip",
        }
    }

    pub fn default_file_name(self) -> String {
        format!("EmployeeMaster.{}", self.extension())
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
            ExportFormat::Json => "application/json",
            ExportFormat::Bundle => "application/zip",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Bundle => "bundle",
            other => other.extension(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown export format '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(0.0).to_string(), "0.00");
        assert_eq!(Value::Number(12.5).to_string(), "12.50");
        assert_eq!(Value::Date(None).to_string(), "");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(1990, 4, 7)).to_string(),
            "1990-04-07"
        );
        assert_eq!(
            Value::Choices(vec!["Mon".into(), "Wed".into(), "Fri".into()]).to_string(),
            "Mon, Wed, Fri"
        );
        assert_eq!(Value::Choice(String::new()).to_string(), "");
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = Record::from_cells(vec![
            Cell {
                field: "Employee ID".into(),
                value: Value::Text("E1".into()),
            },
            Cell {
                field: "Hourly Pay Rate".into(),
                value: Value::Number(15.25),
            },
            Cell {
                field: "Joining Date".into(),
                value: Value::Date(None),
            },
        ]);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Employee ID":"E1","Hourly Pay Rate":15.25,"Joining Date":""}"#
        );
        assert_eq!(record.keys().collect::<Vec<_>>().len(), 3);
    }

    #[test]
    fn test_export_format_names() {
        assert_eq!(ExportFormat::Xlsx.default_file_name(), "EmployeeMaster.xlsx");
        assert_eq!(ExportFormat::Csv.default_file_name(), "EmployeeMaster.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Bundle.default_file_name(), "EmployeeMaster.zip");
        assert_eq!("XLSX".parse::<ExportFormat>(), Ok(ExportFormat::Xlsx));
        assert_eq!("bundle".parse::<ExportFormat>(), Ok(ExportFormat::Bundle));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_raw_input_deserializes_untagged() {
        let form: RawForm = serde_json::from_str(
            r#"{"Full Name": "Jane", "Working Days": ["Mon", "Tue"], "Scheduled Hours": 40}"#,
        )
        .unwrap();
        assert_eq!(form["Full Name"], RawInput::Single("Jane".into()));
        assert_eq!(form["Working Days"], RawInput::from(vec!["Mon", "Tue"]));
        assert_eq!(form["Scheduled Hours"], RawInput::Number(40.0));
    }
}
