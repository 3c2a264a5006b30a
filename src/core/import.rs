//! Batch entry: raw employee forms read from a TOML or JSON file.

use crate::core::staging::StagingSession;
use crate::core::{RawForm, RawInput, Schema};
use crate::utils::error::{EntryError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TomlBatch {
    #[serde(default)]
    employee: Vec<RawForm>,
}

pub fn parse_toml_batch(content: &str) -> std::result::Result<Vec<RawForm>, String> {
    toml::from_str::<TomlBatch>(content)
        .map(|batch| batch.employee)
        .map_err(|e| e.to_string())
}

pub fn parse_json_batch(content: &str) -> std::result::Result<Vec<RawForm>, String> {
    serde_json::from_str::<Vec<RawForm>>(content).map_err(|e| e.to_string())
}

/// Read entries from `path`; the format is picked by extension (`.toml` or `.json`).
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<Vec<RawForm>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parsed = match extension.as_deref() {
        Some("toml") => parse_toml_batch(&content),
        Some("json") => parse_json_batch(&content),
        _ => Err("expected a .toml or .json file".to_string()),
    };

    parsed.map_err(|message| EntryError::ImportError {
        path: path.to_path_buf(),
        message,
    })
}

/// One `[[employee]]` table for `form`, keys in schema order.
pub fn render_toml_entry(schema: &Schema, form: &RawForm) -> String {
    let mut out = String::from("[[employee]]\n");
    for name in schema.names() {
        if let Some(raw) = form.get(name) {
            out.push_str(&format!("\"{}\" = {}\n", name, toml_value(raw)));
        }
    }
    out
}

fn toml_value(raw: &RawInput) -> toml::Value {
    match raw {
        RawInput::Single(s) => toml::Value::String(s.clone()),
        RawInput::Multiple(values) => toml::Value::Array(
            values
                .iter()
                .map(|v| toml::Value::String(v.clone()))
                .collect(),
        ),
        RawInput::Number(n) => toml::Value::Float(*n),
        RawInput::Flag(b) => toml::Value::Boolean(*b),
    }
}

/// Submit every entry to the session; returns how many were staged.
pub fn stage_batch(session: &mut StagingSession, entries: &[RawForm]) -> usize {
    for (idx, entry) in entries.iter().enumerate() {
        warn_unknown_keys(session.schema(), entry, idx);
        session.submit(entry);
    }
    tracing::info!("Staged {} imported employees", entries.len());
    entries.len()
}

fn warn_unknown_keys(schema: &Schema, entry: &RawForm, idx: usize) {
    let mut unknown: Vec<&str> = entry
        .keys()
        .map(String::as_str)
        .filter(|key| schema.field(key).is_none())
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        tracing::warn!("Entry {} has unknown fields, ignoring: {}", idx + 1, unknown.join(", "));
    }
}
