pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::export::{ExportArtifact, Exporter};
pub use crate::core::form::{render_form, sample_form, EntryForm, FormControl};
pub use crate::core::staging::StagingSession;
pub use crate::domain::model::{ExportFormat, RawForm, RawInput, Record, Value};
pub use crate::domain::schema::{FieldDefinition, FieldKind, Schema};
pub use crate::utils::error::{EntryError, Result};
