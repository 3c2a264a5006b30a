//! Schema-driven form model.
//!
//! `render_form` maps each field kind to an input control; front ends draw
//! the controls however they like and feed raw input back through
//! [`EntryForm::set`].

use crate::core::normalize::{normalize_date, normalize_multi_select, normalize_number};
use crate::core::staging::StagingSession;
use crate::core::{FieldKind, RawForm, RawInput, Record, Schema};
use chrono::NaiveDate;

pub const NUMBER_STEP: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum FormControl {
    TextBox {
        label: String,
        value: String,
    },
    NumberSpinner {
        label: String,
        value: f64,
        step: f64,
    },
    DatePicker {
        label: String,
        value: Option<NaiveDate>,
    },
    SingleChoice {
        label: String,
        options: Vec<String>,
        selected: Option<usize>,
    },
    MultiChoice {
        label: String,
        options: Vec<String>,
        selected: Vec<usize>,
    },
}

impl FormControl {
    pub fn label(&self) -> &str {
        match self {
            FormControl::TextBox { label, .. }
            | FormControl::NumberSpinner { label, .. }
            | FormControl::DatePicker { label, .. }
            | FormControl::SingleChoice { label, .. }
            | FormControl::MultiChoice { label, .. } => label,
        }
    }
}

/// One control per schema field, in schema order, seeded from `defaults`.
pub fn render_form(schema: &Schema, defaults: &RawForm) -> Vec<FormControl> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let label = field.name.clone();
            let seed = defaults.get(&field.name);
            match &field.kind {
                FieldKind::Text => FormControl::TextBox {
                    label,
                    value: match seed {
                        Some(RawInput::Single(s)) => s.clone(),
                        _ => String::new(),
                    },
                },
                FieldKind::Number => FormControl::NumberSpinner {
                    label,
                    value: normalize_number(seed),
                    step: NUMBER_STEP,
                },
                FieldKind::Date => FormControl::DatePicker {
                    label,
                    value: normalize_date(seed),
                },
                FieldKind::Select(options) => {
                    let selected = match seed {
                        Some(RawInput::Single(s)) => options.iter().position(|o| o == s.trim()),
                        _ => None,
                    };
                    FormControl::SingleChoice {
                        label,
                        options: options.clone(),
                        selected,
                    }
                }
                FieldKind::MultiSelect(options) => {
                    let chosen = normalize_multi_select(options, seed);
                    let selected = options
                        .iter()
                        .enumerate()
                        .filter(|(_, o)| chosen.contains(o))
                        .map(|(idx, _)| idx)
                        .collect();
                    FormControl::MultiChoice {
                        label,
                        options: options.clone(),
                        selected,
                    }
                }
            }
        })
        .collect()
}

/// A fully populated example employee used by the "load sample" action.
pub fn sample_form() -> RawForm {
    let entries: [(&str, RawInput); 25] = [
        ("Employee ID", "E1001".into()),
        ("Payroll ID", "P-77812".into()),
        ("Store ID", "NNG1".into()),
        ("Store/ Company Name", "Newnan Gas & Food LLC".into()),
        ("Store Address", "12 Bullsboro Dr, Newnan, GA 30263".into()),
        ("Full Name", "Jordan Avery".into()),
        ("Designation", "Store Associate".into()),
        ("Manager Name", "Sam Patel".into()),
        ("Date of Birth", "1994-08-21".into()),
        ("Gender", "Prefer not to say".into()),
        ("Marital Status", "Single".into()),
        ("Contact Number", "(770) 555-0142".into()),
        ("Email Address", "jordan.avery@example.com".into()),
        ("Status", "Active".into()),
        ("Employment Status", "Citizen".into()),
        ("Employment Type", "Full-time".into()),
        ("Pay Basis", "Hourly".into()),
        ("Payment Type", "Check".into()),
        ("Hourly Pay Rate", RawInput::Number(15.5)),
        ("Monthly Salary", RawInput::Number(0.0)),
        ("Weekly Salary", RawInput::Number(0.0)),
        ("Scheduled Hours", RawInput::Number(40.0)),
        ("Working Days", vec!["Mon", "Tue", "Wed", "Thu", "Fri"].into()),
        ("Joining Date", "2023-03-01".into()),
        ("Leaving Date", "".into()),
    ];
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// The mutable state of the entry form between submissions.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    values: RawForm,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<RawInput>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&RawInput> {
        self.values.get(field)
    }

    pub fn values(&self) -> &RawForm {
        &self.values
    }

    /// Pre-fill with the sample employee without submitting.
    pub fn load_sample(&mut self) {
        self.values = sample_form();
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn render(&self, schema: &Schema) -> Vec<FormControl> {
        render_form(schema, &self.values)
    }

    /// Stage the current contents and clear the form for the next entry.
    pub fn submit<'s>(&mut self, session: &'s mut StagingSession) -> &'s Record {
        let values = std::mem::take(&mut self.values);
        session.submit(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_form_dispatches_on_kind() {
        let schema = Schema::employee_master();
        let controls = render_form(&schema, &RawForm::new());
        assert_eq!(controls.len(), schema.len());

        assert!(matches!(&controls[0], FormControl::TextBox { value, .. } if value.is_empty()));
        assert!(matches!(&controls[2], FormControl::SingleChoice { selected: None, .. }));
        assert!(matches!(&controls[8], FormControl::DatePicker { value: None, .. }));
        assert!(matches!(
            &controls[18],
            FormControl::NumberSpinner { value, step, .. } if *value == 0.0 && *step == 1.0
        ));
        assert!(matches!(
            &controls[22],
            FormControl::MultiChoice { selected, .. } if selected.is_empty()
        ));

        let labels: Vec<&str> = controls.iter().map(FormControl::label).collect();
        assert_eq!(labels, schema.names().collect::<Vec<_>>());
    }

    #[test]
    fn test_render_form_seeds_from_defaults() {
        let schema = Schema::employee_master();
        let controls = render_form(&schema, &sample_form());

        match &controls[16] {
            FormControl::SingleChoice {
                label,
                options,
                selected,
            } => {
                assert_eq!(label, "Pay Basis");
                assert_eq!(options[selected.unwrap()], "Hourly");
            }
            other => panic!("unexpected control {:?}", other),
        }
        match &controls[22] {
            FormControl::MultiChoice { selected, .. } => {
                assert_eq!(selected, &vec![0, 1, 2, 3, 4])
            }
            other => panic!("unexpected control {:?}", other),
        }
        assert!(matches!(
            &controls[8],
            FormControl::DatePicker { value: Some(_), .. }
        ));
    }

    #[test]
    fn test_sample_covers_schema() {
        let schema = Schema::employee_master();
        let sample = sample_form();
        assert_eq!(sample.len(), schema.len());
        for name in schema.names() {
            assert!(sample.contains_key(name), "sample is missing {}", name);
        }
    }

    #[test]
    fn test_load_sample_does_not_submit() {
        let mut session = StagingSession::new(Schema::employee_master());
        let mut form = EntryForm::new();
        form.load_sample();

        assert!(session.list_staged().is_empty());
        assert_eq!(form.get("Employee ID"), Some(&RawInput::from("E1001")));
    }

    #[test]
    fn test_submit_resets_form() {
        let mut session = StagingSession::new(Schema::employee_master());
        let mut form = EntryForm::new();
        form.set("Employee ID", "E7");
        form.set("Working Days", vec!["Sat", "Sun"]);

        let record = form.submit(&mut session);
        assert_eq!(record.get("Working Days").unwrap().to_string(), "Sat, Sun");

        assert!(form.values().is_empty());
        assert_eq!(session.len(), 1);
    }
}
