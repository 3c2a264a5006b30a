pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::core::ExportFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hr-master")]
#[command(about = "Stage employee master records and export them to Excel/CSV")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory export files are written to
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// Export formats, comma separated (xlsx, csv, tsv, json, bundle)
    #[arg(long, value_delimiter = ',', global = true)]
    pub formats: Vec<ExportFormat>,

    /// Allow exporting an empty staging table (header-only files)
    #[arg(long, global = true)]
    pub allow_empty: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive entry session (default)
    Entry,
    /// Stage employees from a TOML or JSON file, then export them
    Import {
        /// File with [[employee]] tables (.toml) or an array of objects (.json)
        input: PathBuf,
    },
    /// Print the field list and allowed values
    Schema,
    /// Print the sample employee as TOML
    Sample,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// File config (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(path) = &self.output_path {
            config.export.output_path = path.clone();
        }
        if !self.formats.is_empty() {
            config.export.formats = self.formats.clone();
        }
        if self.allow_empty {
            config.export.allow_empty = true;
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Entry)
    }
}
