use crate::core::normalize::normalize_form;
use crate::core::{RawForm, Record, Schema};

/// The staged employee rows of one entry session.
///
/// Each session owns its own collection; create one per user/connection.
#[derive(Debug, Clone)]
pub struct StagingSession {
    schema: Schema,
    rows: Vec<Record>,
}

impl StagingSession {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Normalize `raw` and append it. Never fails; bad input becomes blanks.
    pub fn submit(&mut self, raw: &RawForm) -> &Record {
        let record = normalize_form(&self.schema, raw);
        self.rows.push(record);
        tracing::debug!("Staged row {}", self.rows.len());
        &self.rows[self.rows.len() - 1]
    }

    pub fn clear_all(&mut self) {
        let dropped = self.rows.len();
        self.rows = Vec::new();
        tracing::info!("Cleared {} staged rows", dropped);
    }

    pub fn list_staged(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for StagingSession {
    fn default() -> Self {
        Self::new(Schema::employee_master())
    }
}
