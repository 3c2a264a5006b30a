pub mod bundle;
pub mod delimited;
pub mod spreadsheet;

use crate::core::staging::StagingSession;
use crate::core::{ConfigProvider, Encoder, ExportFormat, Record, Schema, Storage};
use crate::utils::error::{EntryError, Result};

pub use bundle::BundleEncoder;
pub use delimited::{encode_delimited, DelimitedEncoder};
pub use spreadsheet::{encode_spreadsheet, SpreadsheetEncoder, SpreadsheetOptions};

/// Staged rows as a JSON array of objects keyed by field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, records: &[Record], _schema: &Schema) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(records)?)
    }
}

/// One encoded artifact, ready to hand to a download or to storage.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn encoder_for<C: ConfigProvider>(format: ExportFormat, config: &C) -> Box<dyn Encoder> {
    let spreadsheet = SpreadsheetOptions {
        include_descriptions: config.include_descriptions(),
    };
    match format {
        ExportFormat::Xlsx => Box::new(SpreadsheetEncoder {
            options: spreadsheet,
        }),
        ExportFormat::Csv => Box::new(DelimitedEncoder::csv()),
        ExportFormat::Tsv => Box::new(DelimitedEncoder::tsv()),
        ExportFormat::Json => Box::new(JsonEncoder),
        ExportFormat::Bundle => Box::new(BundleEncoder {
            spreadsheet,
            xlsx_name: config.file_name(ExportFormat::Xlsx),
            csv_name: config.file_name(ExportFormat::Csv),
        }),
    }
}

pub struct Exporter<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> Exporter<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Encode the session's rows in one format.
    ///
    /// Refuses an empty session unless empty exports are allowed, so a
    /// header-only file is never produced by accident.
    pub fn encode(&self, session: &StagingSession, format: ExportFormat) -> Result<ExportArtifact> {
        let records = session.list_staged();
        if records.is_empty() && !self.config.allow_empty_export() {
            return Err(EntryError::EmptyExport);
        }

        let bytes = encoder_for(format, &self.config).encode(records, session.schema())?;
        tracing::debug!("Encoded {} rows as {} ({} bytes)", records.len(), format, bytes.len());

        Ok(ExportArtifact {
            format,
            file_name: self.config.file_name(format),
            mime_type: format.mime_type(),
            bytes,
        })
    }

    /// Encode every configured format, then write each artifact to storage.
    ///
    /// Nothing is written unless every format encodes. A storage failure
    /// after the first write comes back as `PartialExport` naming the files
    /// already saved.
    pub fn export(&self, session: &StagingSession) -> Result<Vec<String>> {
        let artifacts = self
            .config
            .formats()
            .iter()
            .map(|&format| self.encode(session, format))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::new();
        for artifact in artifacts {
            let location = match self.storage.write_file(&artifact.file_name, &artifact.bytes) {
                Ok(location) => location,
                Err(e) if written.is_empty() => return Err(e),
                Err(e) => {
                    return Err(EntryError::PartialExport {
                        written,
                        source: Box::new(e),
                    })
                }
            };
            tracing::info!(
                "Exported {} rows to {} ({})",
                session.len(),
                location,
                artifact.mime_type
            );
            written.push(location);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawForm;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
        fail_on: Option<String>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).ok_or_else(|| {
                EntryError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(EntryError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("cannot write {}", path),
                )));
            }
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(format!("mock/{}", path))
        }
    }

    struct MockConfig {
        formats: Vec<ExportFormat>,
        allow_empty: bool,
    }

    impl MockConfig {
        fn new(formats: Vec<ExportFormat>) -> Self {
            Self {
                formats,
                allow_empty: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn output_path(&self) -> &str {
            "mock"
        }

        fn formats(&self) -> &[ExportFormat] {
            &self.formats
        }

        fn file_name(&self, format: ExportFormat) -> String {
            format.default_file_name()
        }

        fn allow_empty_export(&self) -> bool {
            self.allow_empty
        }

        fn include_descriptions(&self) -> bool {
            false
        }
    }

    fn session_with_rows(n: usize) -> StagingSession {
        let mut session = StagingSession::default();
        for i in 0..n {
            let mut raw = RawForm::new();
            raw.insert("Employee ID".into(), format!("E{}", i).into());
            session.submit(&raw);
        }
        session
    }

    #[test]
    fn test_export_writes_every_configured_format() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(
            storage.clone(),
            MockConfig::new(vec![ExportFormat::Xlsx, ExportFormat::Csv]),
        );

        let written = exporter.export(&session_with_rows(2)).unwrap();
        assert_eq!(
            written,
            vec!["mock/EmployeeMaster.xlsx", "mock/EmployeeMaster.csv"]
        );

        let csv = String::from_utf8(storage.get_file("EmployeeMaster.csv").unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(storage.read_file("EmployeeMaster.xlsx").is_ok());
    }

    #[test]
    fn test_empty_session_is_refused_by_default() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone(), MockConfig::new(vec![ExportFormat::Csv]));

        let result = exporter.export(&StagingSession::default());
        assert!(matches!(result, Err(EntryError::EmptyExport)));
        assert!(storage.get_file("EmployeeMaster.csv").is_none());
    }

    #[test]
    fn test_failed_write_reports_files_already_saved() {
        let storage = MockStorage {
            fail_on: Some("EmployeeMaster.json".to_string()),
            ..MockStorage::default()
        };
        let exporter = Exporter::new(
            storage.clone(),
            MockConfig::new(vec![ExportFormat::Csv, ExportFormat::Json]),
        );

        match exporter.export(&session_with_rows(1)) {
            Err(EntryError::PartialExport { written, source }) => {
                assert_eq!(written, vec!["mock/EmployeeMaster.csv"]);
                assert!(matches!(*source, EntryError::IoError(_)));
            }
            other => panic!("expected partial export, got {:?}", other),
        }
        assert!(storage.get_file("EmployeeMaster.csv").is_some());
    }

    #[test]
    fn test_first_write_failure_is_returned_as_is() {
        let storage = MockStorage {
            fail_on: Some("EmployeeMaster.csv".to_string()),
            ..MockStorage::default()
        };
        let exporter = Exporter::new(storage, MockConfig::new(vec![ExportFormat::Csv]));

        let result = exporter.export(&session_with_rows(1));
        assert!(matches!(result, Err(EntryError::IoError(_))));
    }

    #[test]
    fn test_empty_session_allowed_gives_header_only() {
        let mut config = MockConfig::new(vec![ExportFormat::Csv]);
        config.allow_empty = true;
        let exporter = Exporter::new(MockStorage::default(), config);

        let artifact = exporter
            .encode(&StagingSession::default(), ExportFormat::Csv)
            .unwrap();
        assert_eq!(artifact.mime_type, "text/csv");
        assert_eq!(String::from_utf8(artifact.bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_json_artifact() {
        let exporter = Exporter::new(MockStorage::default(), MockConfig::new(vec![]));
        let artifact = exporter
            .encode(&session_with_rows(1), ExportFormat::Json)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
        assert_eq!(parsed[0]["Employee ID"], "E0");
        assert_eq!(parsed[0]["Monthly Salary"], 0.0);
        assert_eq!(parsed[0]["Leaving Date"], "");
        assert_eq!(artifact.file_name, "EmployeeMaster.json");
    }
}
