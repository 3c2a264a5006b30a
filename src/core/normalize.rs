//! Per-kind normalization of raw form input into typed values.
//!
//! Every function here is total: malformed or missing input yields the
//! kind's empty value instead of an error.

use crate::core::{FieldDefinition, FieldKind, RawForm, RawInput, Record, Schema, Value};
use crate::domain::model::{Cell, CHOICE_SEPARATOR};
use chrono::NaiveDate;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Normalize a whole form against the schema. Keys not in the schema are ignored.
pub fn normalize_form(schema: &Schema, raw: &RawForm) -> Record {
    let cells = schema
        .fields()
        .iter()
        .map(|field| Cell {
            field: field.name.clone(),
            value: normalize_field(field, raw.get(&field.name)),
        })
        .collect();
    Record::from_cells(cells)
}

pub fn normalize_field(field: &FieldDefinition, raw: Option<&RawInput>) -> Value {
    match &field.kind {
        FieldKind::Text => Value::Text(normalize_text(raw)),
        FieldKind::Number => Value::Number(normalize_number(raw)),
        FieldKind::Date => {
            let value = normalize_date(raw);
            if value.is_none() && has_content(raw) {
                tracing::warn!("Unrecognized date for '{}', leaving it blank", field.name);
            }
            Value::Date(value)
        }
        FieldKind::Select(options) => {
            let value = normalize_select(options, raw);
            if value.is_empty() && has_content(raw) {
                tracing::warn!(
                    "Value for '{}' is not one of its options, leaving it blank",
                    field.name
                );
            }
            Value::Choice(value)
        }
        FieldKind::MultiSelect(options) => Value::Choices(normalize_multi_select(options, raw)),
    }
}

pub fn normalize_text(raw: Option<&RawInput>) -> String {
    match raw {
        None => String::new(),
        Some(RawInput::Single(s)) => s.clone(),
        Some(RawInput::Multiple(values)) => values.join(CHOICE_SEPARATOR),
        Some(RawInput::Number(n)) => n.to_string(),
        Some(RawInput::Flag(b)) => b.to_string(),
    }
}

pub fn normalize_number(raw: Option<&RawInput>) -> f64 {
    let parsed = match raw {
        Some(RawInput::Number(n)) => Some(*n),
        Some(RawInput::Single(s)) => parse_number(s),
        Some(RawInput::Multiple(values)) => values.first().and_then(|s| parse_number(s)),
        Some(RawInput::Flag(_)) | None => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    cleaned.parse::<f64>().ok()
}

pub fn normalize_date(raw: Option<&RawInput>) -> Option<NaiveDate> {
    let text = match raw {
        Some(RawInput::Single(s)) => s.trim(),
        Some(RawInput::Multiple(values)) => values.first().map(|s| s.trim())?,
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

pub fn normalize_select(options: &[String], raw: Option<&RawInput>) -> String {
    let candidate = match raw {
        Some(RawInput::Single(s)) => s.as_str(),
        Some(RawInput::Multiple(values)) => match values.first() {
            Some(first) => first.as_str(),
            None => return String::new(),
        },
        _ => return String::new(),
    };
    match_option(options, candidate)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Matched options, without duplicates, in the order they were picked.
pub fn normalize_multi_select(options: &[String], raw: Option<&RawInput>) -> Vec<String> {
    let candidates: Vec<&str> = match raw {
        Some(RawInput::Multiple(values)) => values.iter().map(String::as_str).collect(),
        Some(RawInput::Single(s)) => s.split(',').collect(),
        _ => Vec::new(),
    };

    let mut chosen: Vec<String> = Vec::new();
    for candidate in candidates {
        match match_option(options, candidate) {
            Some(option) if !chosen.iter().any(|c| c == option) => chosen.push(option.to_string()),
            Some(_) => {}
            None if !candidate.trim().is_empty() => {
                tracing::debug!("Dropping unknown option '{}'", candidate.trim());
            }
            None => {}
        }
    }
    chosen
}

/// Exact match first, then case-insensitive; returns the canonical spelling.
fn match_option<'a>(options: &'a [String], candidate: &str) -> Option<&'a str> {
    match_index(options, candidate).map(|idx| options[idx].as_str())
}

fn match_index(options: &[String], candidate: &str) -> Option<usize> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    options
        .iter()
        .position(|o| o == candidate)
        .or_else(|| {
            options
                .iter()
                .position(|o| o.to_lowercase() == candidate.to_lowercase())
        })
}

fn has_content(raw: Option<&RawInput>) -> bool {
    match raw {
        Some(RawInput::Single(s)) => !s.trim().is_empty(),
        Some(RawInput::Multiple(values)) => values.iter().any(|s| !s.trim().is_empty()),
        Some(RawInput::Number(_)) | Some(RawInput::Flag(_)) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{PAY_BASIS_OPTIONS, WEEKDAY_OPTIONS};

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number(None), 0.0);
        assert_eq!(normalize_number(Some(&"12.5".into())), 12.5);
        assert_eq!(normalize_number(Some(&" $1,250.75 ".into())), 1250.75);
        assert_eq!(normalize_number(Some(&"abc".into())), 0.0);
        assert_eq!(normalize_number(Some(&"".into())), 0.0);
        assert_eq!(normalize_number(Some(&RawInput::Number(f64::NAN))), 0.0);
        assert_eq!(normalize_number(Some(&"inf".into())), 0.0);
        assert_eq!(normalize_number(Some(&RawInput::Number(40.0))), 40.0);
    }

    #[test]
    fn test_normalize_date() {
        let expected = NaiveDate::from_ymd_opt(1990, 4, 7);
        assert_eq!(normalize_date(Some(&"1990-04-07".into())), expected);
        assert_eq!(normalize_date(Some(&"04/07/1990".into())), expected);
        assert_eq!(normalize_date(Some(&"1990/04/07".into())), expected);
        assert_eq!(normalize_date(Some(&" 1990-04-07 ".into())), expected);
        assert_eq!(normalize_date(Some(&"".into())), None);
        assert_eq!(normalize_date(Some(&"1990-02-30".into())), None);
        assert_eq!(normalize_date(Some(&"yesterday".into())), None);
        assert_eq!(normalize_date(Some(&RawInput::Number(19900407.0))), None);
        assert_eq!(normalize_date(None), None);
    }

    #[test]
    fn test_normalize_select() {
        let options = opts(PAY_BASIS_OPTIONS);
        assert_eq!(normalize_select(&options, Some(&"Hourly".into())), "Hourly");
        assert_eq!(normalize_select(&options, Some(&" salary ".into())), "Salary");
        assert_eq!(normalize_select(&options, Some(&"Weekly".into())), "");
        assert_eq!(normalize_select(&options, None), "");
        assert_eq!(
            normalize_select(&options, Some(&vec!["Mixed", "Hourly"].into())),
            "Mixed"
        );
    }

    #[test]
    fn test_normalize_multi_select_keeps_pick_order_and_dedups() {
        let options = opts(WEEKDAY_OPTIONS);
        let raw = RawInput::from(vec!["Fri", "Mon", "wed", "Mon", "Funday"]);
        assert_eq!(
            normalize_multi_select(&options, Some(&raw)),
            vec!["Fri", "Mon", "Wed"]
        );

        let repeated = RawInput::from("Sun, sun, Sat");
        assert_eq!(
            normalize_multi_select(&options, Some(&repeated)),
            vec!["Sun", "Sat"]
        );

        let joined = RawInput::from("Sat, Sun");
        assert_eq!(
            normalize_multi_select(&options, Some(&joined)),
            vec!["Sat", "Sun"]
        );
        assert!(normalize_multi_select(&options, None).is_empty());
        assert!(normalize_multi_select(&options, Some(&"".into())).is_empty());
    }

    #[test]
    fn test_normalize_text_keeps_input_verbatim() {
        assert_eq!(normalize_text(Some(&"  Jane Doe ".into())), "  Jane Doe ");
        assert_eq!(normalize_text(Some(&vec!["a", "b"].into())), "a, b");
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn test_normalize_form_covers_every_field() {
        let schema = Schema::employee_master();
        let mut raw = RawForm::new();
        raw.insert("Employee ID".into(), "E1".into());
        raw.insert("Not A Field".into(), "ignored".into());

        let record = normalize_form(&schema, &raw);
        let keys: Vec<&str> = record.keys().collect();
        let names: Vec<&str> = schema.names().collect();
        assert_eq!(keys, names);
        assert_eq!(record.get("Employee ID"), Some(&Value::Text("E1".into())));
        assert_eq!(record.get("Monthly Salary"), Some(&Value::Number(0.0)));
        assert_eq!(record.get("Date of Birth"), Some(&Value::Date(None)));
        assert!(record.get("Not A Field").is_none());
    }
}
