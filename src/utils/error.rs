use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Spreadsheet encoding failed: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cannot import {path:?}: {message}")]
    ImportError { path: PathBuf, message: String },

    #[error("Schema declares field '{name}' more than once")]
    DuplicateField { name: String },

    #[error("Schema contains a field with an empty name")]
    EmptyFieldName,

    #[error("Nothing to export: the staging table is empty")]
    EmptyExport,

    #[error("Export stopped after writing {written:?}: {source}")]
    PartialExport {
        written: Vec<String>,
        #[source]
        source: Box<EntryError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Encoding,
    Storage,
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EntryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EntryError::ConfigValidationError { .. }
            | EntryError::InvalidConfigValueError { .. }
            | EntryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EntryError::ImportError { .. } | EntryError::EmptyExport => ErrorCategory::Input,
            EntryError::ZipError(_)
            | EntryError::XlsxError(_)
            | EntryError::CsvError(_)
            | EntryError::SerializationError(_) => ErrorCategory::Encoding,
            EntryError::IoError(_) | EntryError::PartialExport { .. } => ErrorCategory::Storage,
            EntryError::DuplicateField { .. } | EntryError::EmptyFieldName => {
                ErrorCategory::Schema
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => match self {
                EntryError::EmptyExport => ErrorSeverity::Low,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Encoding | ErrorCategory::Schema => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EntryError::EmptyExport => {
                "Add at least one employee before exporting, or set export.allow_empty = true"
            }
            EntryError::ImportError { .. } => {
                "Check that the file is a TOML file with [[employee]] tables \
                 or a JSON array of objects"
            }
            EntryError::IoError(_) | EntryError::PartialExport { .. } => {
                "Check that the output directory exists and is writable"
            }
            EntryError::ConfigValidationError { .. }
            | EntryError::InvalidConfigValueError { .. }
            | EntryError::MissingConfigError { .. } => {
                "Fix the configuration file or the command-line flags and try again"
            }
            EntryError::DuplicateField { .. } | EntryError::EmptyFieldName => {
                "Every schema field needs a unique, non-empty name"
            }
            EntryError::ZipError(_)
            | EntryError::XlsxError(_)
            | EntryError::CsvError(_)
            | EntryError::SerializationError(_) => {
                "Retry the export; if it keeps failing, report a bug"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EntryError::EmptyExport => "No employees have been added yet.".to_string(),
            EntryError::IoError(e) => format!("Could not write the export file: {}", e),
            EntryError::ImportError { path, message } => {
                format!("Could not read employees from {}: {}", path.display(), message)
            }
            EntryError::PartialExport { written, source } => format!(
                "Export incomplete ({}); already saved: {}",
                source.user_friendly_message(),
                written.join(", ")
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EntryError>;
