use crate::utils::error::{EntryError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A bare file name: no directory components, required extension.
pub fn validate_file_name(field_name: &str, file_name: &str, extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, file_name)?;

    if file_name.contains('/') || file_name.contains('\\') {
        return Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "File name must not contain directory separators".to_string(),
        });
    }

    match std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => Ok(()),
        Some(ext) => Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: format!("Expected a .{} file, got .{}", extension, ext),
        }),
        None => Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file_name.to_string(),
            reason: "File has no extension".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EntryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(EntryError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Valid values: {}", allowed.join(", ")),
    })
}

pub fn validate_no_duplicates(field_name: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(EntryError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.output_path", "./output").is_ok());
        assert!(validate_path("export.output_path", "").is_err());
        assert!(validate_path("export.output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("filenames.csv", "EmployeeMaster.csv", "csv").is_ok());
        assert!(validate_file_name("filenames.csv", "Employees.CSV", "csv").is_ok());
        assert!(validate_file_name("filenames.csv", "EmployeeMaster.xlsx", "csv").is_err());
        assert!(validate_file_name("filenames.csv", "out/EmployeeMaster.csv", "csv").is_err());
        assert!(validate_file_name("filenames.csv", "EmployeeMaster", "csv").is_err());
        assert!(validate_file_name("filenames.csv", "  ", "csv").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("export.formats", "csv", &["csv", "xlsx"]).is_ok());
        assert!(validate_one_of("export.formats", "pdf", &["csv", "xlsx"]).is_err());
    }

    #[test]
    fn test_validate_no_duplicates() {
        let values = vec!["csv".to_string(), "xlsx".to_string()];
        assert!(validate_no_duplicates("export.formats", &values).is_ok());

        let dupes = vec!["csv".to_string(), "csv".to_string()];
        assert!(validate_no_duplicates("export.formats", &dupes).is_err());
    }
}
