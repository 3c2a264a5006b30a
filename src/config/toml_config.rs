use crate::core::{ConfigProvider, ExportFormat};
use crate::utils::error::{EntryError, Result};
use crate::utils::validation::{
    validate_file_name, validate_no_duplicates, validate_one_of, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<ExportFormat>,
    pub allow_empty: bool,
    pub include_descriptions: bool,
    pub filenames: FilenameConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            formats: vec![ExportFormat::Xlsx, ExportFormat::Csv],
            allow_empty: false,
            include_descriptions: true,
            filenames: FilenameConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameConfig {
    pub xlsx: Option<String>,
    pub csv: Option<String>,
    pub tsv: Option<String>,
    pub json: Option<String>,
    pub bundle: Option<String>,
}

impl FilenameConfig {
    pub fn get(&self, format: ExportFormat) -> Option<&str> {
        match format {
            ExportFormat::Xlsx => self.xlsx.as_deref(),
            ExportFormat::Csv => self.csv.as_deref(),
            ExportFormat::Tsv => self.tsv.as_deref(),
            ExportFormat::Json => self.json.as_deref(),
            ExportFormat::Bundle => self.bundle.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl TomlConfig {
    /// Load configuration from a TOML file; missing sections take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EntryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EntryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("export.output_path", &self.export.output_path)?;

        if self.export.formats.is_empty() {
            return Err(EntryError::MissingConfigError {
                field: "export.formats".to_string(),
            });
        }
        let names: Vec<String> = self.export.formats.iter().map(|f| f.to_string()).collect();
        validate_no_duplicates("export.formats", &names)?;

        for format in ExportFormat::ALL {
            if let Some(name) = self.export.filenames.get(format) {
                let field = format!("export.filenames.{}", format);
                validate_file_name(&field, name, format.extension())?;
            }
        }

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &["trace", "debug", "info", "warn", "error"])?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn formats(&self) -> &[ExportFormat] {
        &self.export.formats
    }

    fn file_name(&self, format: ExportFormat) -> String {
        self.export
            .filenames
            .get(format)
            .map(str::to_string)
            .unwrap_or_else(|| format.default_file_name())
    }

    fn allow_empty_export(&self) -> bool {
        self.export.allow_empty
    }

    fn include_descriptions(&self) -> bool {
        self.export.include_descriptions
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
