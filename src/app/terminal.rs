//! Line-based front end: prompts each form control in turn and keeps the
//! staging table for the lifetime of one run.

use crate::core::export::delimited::row_values;
use crate::core::export::Exporter;
use crate::core::form::{EntryForm, FormControl};
use crate::core::staging::StagingSession;
use crate::core::{ConfigProvider, RawInput, Storage};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Columns shown in the staging preview; the export always carries all of them.
pub const PREVIEW_COLUMNS: &[&str] = &[
    "Employee ID",
    "Full Name",
    "Store ID",
    "Designation",
    "Status",
];

const HELP: &str = "\
Commands:
  add     fill in the form and add a row
  sample  load the sample employee into the form
  list    show the staging table
  clear   remove all staged rows
  export  write the configured export files
  help    show this message
  quit    leave (staged rows are discarded)";

pub struct TerminalSession<R: BufRead, W: Write, S: Storage, C: ConfigProvider> {
    input: R,
    output: W,
    session: StagingSession,
    form: EntryForm,
    exporter: Exporter<S, C>,
}

impl<R: BufRead, W: Write, S: Storage, C: ConfigProvider> TerminalSession<R, W, S, C> {
    pub fn new(input: R, output: W, session: StagingSession, exporter: Exporter<S, C>) -> Self {
        Self {
            input,
            output,
            session,
            form: EntryForm::new(),
            exporter,
        }
    }

    pub fn session(&self) -> &StagingSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "HR Employee Master")?;
        writeln!(self.output, "Type 'help' for commands.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            match line.trim().to_lowercase().as_str() {
                "" => {}
                "add" => self.add_row()?,
                "sample" => {
                    self.form.load_sample();
                    writeln!(
                        self.output,
                        "Sample employee loaded; run 'add' to review and submit."
                    )?;
                }
                "list" => self.print_table()?,
                "clear" => {
                    self.session.clear_all();
                    writeln!(self.output, "All records cleared.")?;
                }
                "export" => self.export()?,
                "help" => writeln!(self.output, "{}", HELP)?,
                "quit" | "exit" => break,
                other => writeln!(self.output, "Unknown command '{}'. Type 'help'.", other)?,
            }
        }

        tracing::debug!("Entry session ended with {} staged rows", self.session.len());
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add_row(&mut self) -> Result<()> {
        let controls = self.form.render(self.session.schema());
        for control in &controls {
            self.prompt_control(control)?;
            let Some(answer) = self.read_line()? else {
                writeln!(self.output)?;
                writeln!(self.output, "Input ended; row not added.")?;
                return Ok(());
            };
            if let Some(value) = interpret_answer(control, &answer) {
                self.form.set(control.label(), value);
            }
        }

        self.form.submit(&mut self.session);
        writeln!(self.output, "Row added. Rows: {}", self.session.len())?;
        Ok(())
    }

    fn prompt_control(&mut self, control: &FormControl) -> Result<()> {
        match control {
            FormControl::TextBox { label, value } => {
                write!(self.output, "{} [{}]: ", label, value)?;
            }
            FormControl::NumberSpinner { label, value, .. } => {
                write!(self.output, "{} [{:.2}]: ", label, value)?;
            }
            FormControl::DatePicker { label, value } => {
                let current = value.map(|d| d.to_string()).unwrap_or_default();
                write!(self.output, "{} (YYYY-MM-DD) [{}]: ", label, current)?;
            }
            FormControl::SingleChoice {
                label,
                options,
                selected,
            } => {
                write_options(&mut self.output, options)?;
                let current = selected.map(|i| options[i].as_str()).unwrap_or("");
                write!(self.output, "{} [{}]: ", label, current)?;
            }
            FormControl::MultiChoice {
                label,
                options,
                selected,
            } => {
                write_options(&mut self.output, options)?;
                let current: Vec<&str> = selected.iter().map(|&i| options[i].as_str()).collect();
                write!(self.output, "{} (comma separated) [{}]: ", label, current.join(", "))?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_table(&mut self) -> Result<()> {
        let schema = self.session.schema();
        let columns: Vec<usize> = PREVIEW_COLUMNS
            .iter()
            .filter_map(|name| schema.names().position(|n| n == *name))
            .collect();

        let header: Vec<&str> = columns
            .iter()
            .filter_map(|&i| schema.fields().get(i).map(|f| f.name.as_str()))
            .collect();
        writeln!(self.output, "#  | {}", header.join(" | "))?;

        for (idx, record) in self.session.list_staged().iter().enumerate() {
            let values = row_values(record, schema);
            let shown: Vec<&str> = columns.iter().map(|&i| values[i].as_str()).collect();
            writeln!(self.output, "{:<2} | {}", idx + 1, shown.join(" | "))?;
        }
        writeln!(self.output, "Rows: {}", self.session.len())?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        match self.exporter.export(&self.session) {
            Ok(paths) => {
                for path in paths {
                    writeln!(self.output, "Saved {}", path)?;
                }
            }
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                writeln!(self.output, "{}", e.user_friendly_message())?;
                writeln!(self.output, "Hint: {}", e.recovery_suggestion())?;
            }
        }
        Ok(())
    }
}

fn write_options<W: Write>(output: &mut W, options: &[String]) -> Result<()> {
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "  {:>2}) {}", idx + 1, option)?;
    }
    Ok(())
}

/// Blank keeps the current value; `-` clears it. Choice fields accept the
/// option number or its name.
fn interpret_answer(control: &FormControl, answer: &str) -> Option<RawInput> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    if answer == "-" {
        return Some(match control {
            FormControl::MultiChoice { .. } => RawInput::Multiple(Vec::new()),
            _ => RawInput::Single(String::new()),
        });
    }

    match control {
        FormControl::SingleChoice { options, .. } => Some(RawInput::Single(pick(options, answer))),
        FormControl::MultiChoice { options, .. } => Some(RawInput::Multiple(
            answer
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| pick(options, token))
                .collect(),
        )),
        _ => Some(RawInput::Single(answer.to_string())),
    }
}

fn pick(options: &[String], token: &str) -> String {
    match token.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].clone(),
        _ => token.to_string(),
    }
}
