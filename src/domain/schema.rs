//! The employee master schema: an ordered list of typed field definitions.
//!
//! Field order drives form layout, record layout and export column order.

use crate::utils::error::{EntryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const STORE_NAME_OPTIONS: &[&str] = &[
    "4955 USA LLC",
    "A&K Global USA LLC",
    "Aaliya USA LLC",
    "Arshi & Khushi LLC",
    "Ask Global USA LLC",
    "BH1 USA LLC",
    "CAD1 USA LLC",
    "CDP USA LLC",
    "CDP1 USA LLC",
    "CH1 USA LLC",
    "EM1 USA LLC",
    "Fairview Tobacco Store LLC",
    "Forest Park Mart LLC",
    "FR1 USA LLC",
    "FR2155 USA LLC",
    "HR1 USA LLC",
    "JBR2 USA LLC",
    "JFH3 USA LLC",
    "JFH4 USA LLC",
    "Kushi Ali Inc",
    "M1L1K USA LLC",
    "MAM1 USA LLC",
    "MH1 USA LLC",
    "MVB1 USA LLC",
    "NE41 USA LLC",
    "Newnan Gas & Food LLC",
    "Nextday Wholesale LLC",
    "ODH1",
    "RX1 USA LLC",
    "SGC Gas Mart LLC",
    "SS1 USA LLC",
    "SSM2 USA LLC",
    "TR1 USA LLC",
    "TS1 USA LLC",
    "TWP1 USA LLC",
    "WC1 USA LLC",
    "NextDay Wholesale LLC",
    "YVS Partners LLC",
    "Skyzone",
];

pub const STORE_ID_OPTIONS: &[&str] = &[
    "4955", "AKG", "AAL", "ANK1", "ASK", "BH1", "CAD1", "CDP", "CDP1", "CH1", "EM1", "FTS", "FPM1",
    "FR1", "FR2", "HR1", "JBR2", "JFH3", "JFH4", "KAI", "MLK1", "MAM1", "MH1", "MVB1", "NE41",
    "NNG1", "NDWS", "ODH1", "RX1", "SGC", "SS1", "SSM2", "TR1", "TS1", "TWP1", "WC1",
];

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Prefer not to say"];
pub const MARITAL_STATUS_OPTIONS: &[&str] = &["Single", "Married", "Prefer not to say"];
pub const STATUS_OPTIONS: &[&str] = &["Active", "On Leave", "Terminated"];
pub const EMPLOYMENT_STATUS_OPTIONS: &[&str] =
    &["F1", "F2", "Citizen", "Greencard", "Asylum", "H1B", "B1/B2", "H4"];
pub const EMPLOYMENT_TYPE_OPTIONS: &[&str] =
    &["Full-time", "Part-time", "Temporary", "Intern", "Contractor"];
pub const PAY_BASIS_OPTIONS: &[&str] = &["Hourly", "Salary", "Mixed"];
pub const PAYMENT_TYPE_OPTIONS: &[&str] = &["Cash", "Check", "Cash/Check"];
pub const WEEKDAY_OPTIONS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// What kind of input a field takes, and for choice fields, the allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select(Vec<String>),
    MultiSelect(Vec<String>),
}

impl FieldKind {
    pub fn select(options: &[&str]) -> Self {
        FieldKind::Select(options.iter().map(|o| o.to_string()).collect())
    }

    pub fn multi_select(options: &[&str]) -> Self {
        FieldKind::MultiSelect(options.iter().map(|o| o.to_string()).collect())
    }

    /// Type tag as shown in the data dictionary.
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Select(_) => "select",
            FieldKind::MultiSelect(_) => "multiselect",
        }
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select(options) | FieldKind::MultiSelect(options) => Some(options),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Build a schema, rejecting empty or repeated field names.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(EntryError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(EntryError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    /// The fixed 25-column HR employee master.
    pub fn employee_master() -> Self {
        use FieldKind::{Date, Number, Text};

        let fields = vec![
            FieldDefinition::new("Employee ID", Text)
                .with_description("Internal employee identifier"),
            FieldDefinition::new("Payroll ID", Text)
                .with_description("Identifier used by the payroll provider"),
            FieldDefinition::new("Store ID", FieldKind::select(STORE_ID_OPTIONS))
                .with_description("Site code of the store the employee works at"),
            FieldDefinition::new("Store/ Company Name", FieldKind::select(STORE_NAME_OPTIONS))
                .with_description("Legal entity that employs the employee"),
            FieldDefinition::new("Store Address", Text)
                .with_description("Street address of the store"),
            FieldDefinition::new("Full Name", Text).with_description("Employee's legal full name"),
            FieldDefinition::new("Designation", Text).with_description("Job title"),
            FieldDefinition::new("Manager Name", Text).with_description("Direct manager"),
            FieldDefinition::new("Date of Birth", Date)
                .with_description("ISO-8601 date, blank if unknown"),
            FieldDefinition::new("Gender", FieldKind::select(GENDER_OPTIONS)),
            FieldDefinition::new("Marital Status", FieldKind::select(MARITAL_STATUS_OPTIONS)),
            FieldDefinition::new("Contact Number", Text)
                .with_description("Phone number as entered"),
            FieldDefinition::new("Email Address", Text),
            FieldDefinition::new("Status", FieldKind::select(STATUS_OPTIONS))
                .with_description("Current employment state"),
            FieldDefinition::new("Employment Status", FieldKind::select(EMPLOYMENT_STATUS_OPTIONS))
                .with_description("Work authorization status"),
            FieldDefinition::new("Employment Type", FieldKind::select(EMPLOYMENT_TYPE_OPTIONS)),
            FieldDefinition::new("Pay Basis", FieldKind::select(PAY_BASIS_OPTIONS))
                .with_description("How pay is computed"),
            FieldDefinition::new("Payment Type", FieldKind::select(PAYMENT_TYPE_OPTIONS))
                .with_description("How pay is disbursed"),
            FieldDefinition::new("Hourly Pay Rate", Number).with_description("USD per hour"),
            FieldDefinition::new("Monthly Salary", Number).with_description("USD per month"),
            FieldDefinition::new("Weekly Salary", Number).with_description("USD per week"),
            FieldDefinition::new("Scheduled Hours", Number).with_description("Hours per week"),
            FieldDefinition::new("Working Days", FieldKind::multi_select(WEEKDAY_OPTIONS))
                .with_description("Comma-separated weekday abbreviations"),
            FieldDefinition::new("Joining Date", Date).with_description("ISO-8601 date"),
            FieldDefinition::new("Leaving Date", Date)
                .with_description("ISO-8601 date, blank while employed"),
        ];

        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::employee_master()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_master_layout() {
        let schema = Schema::employee_master();
        assert_eq!(schema.len(), 25);

        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names[0], "Employee ID");
        assert_eq!(names[3], "Store/ Company Name");
        assert_eq!(names[22], "Working Days");
        assert_eq!(names[24], "Leaving Date");

        // passes the same checks a hand-built schema does
        assert!(Schema::new(schema.fields().to_vec()).is_ok());
    }

    #[test]
    fn test_field_kinds() {
        let schema = Schema::employee_master();
        assert_eq!(schema.field("Date of Birth").unwrap().kind, FieldKind::Date);
        assert_eq!(schema.field("Hourly Pay Rate").unwrap().kind, FieldKind::Number);

        let days = schema.field("Working Days").unwrap();
        assert_eq!(days.kind.tag(), "multiselect");
        assert_eq!(days.kind.allowed_values().unwrap().len(), 7);

        let store_ids = schema.field("Store ID").unwrap();
        assert_eq!(store_ids.kind.allowed_values().unwrap().len(), 36);
        assert!(schema.field("Full Name").unwrap().kind.allowed_values().is_none());
        assert!(schema.field("SSN").is_none());
    }

    #[test]
    fn test_schema_rejects_duplicate_names() {
        let fields = vec![
            FieldDefinition::new("Employee ID", FieldKind::Text),
            FieldDefinition::new("Employee ID", FieldKind::Number),
        ];
        match Schema::new(fields) {
            Err(EntryError::DuplicateField { name }) => assert_eq!(name, "Employee ID"),
            other => panic!("expected duplicate field error, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_rejects_empty_name() {
        let fields = vec![FieldDefinition::new(" ", FieldKind::Text)];
        assert!(matches!(Schema::new(fields), Err(EntryError::EmptyFieldName)));
    }

    #[test]
    fn test_field_definition_serializes_kind_inline() {
        let field = FieldDefinition::new("Pay Basis", FieldKind::select(PAY_BASIS_OPTIONS));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["name"], "Pay Basis");
        assert_eq!(json["type"], "select");
        assert_eq!(json["options"][0], "Hourly");
        assert!(json.get("description").is_none());
    }
}
