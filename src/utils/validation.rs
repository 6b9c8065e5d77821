use crate::utils::error::{PayrollError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(PayrollError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one value is required".to_string(),
        });
    }
    Ok(())
}

/// Every path must name an existing regular file.
pub fn validate_files_exist(files: &[String]) -> Result<()> {
    for file in files {
        if !Path::new(file).is_file() {
            return Err(PayrollError::FileNotFound {
                path: file.into(),
            });
        }
    }
    Ok(())
}

pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    if delimiter == '\n' || delimiter == '\r' {
        return Err(PayrollError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: "Delimiter cannot be a line break".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PayrollError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_files_exist() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,name").unwrap();
        let present = file.path().to_str().unwrap().to_string();

        assert!(validate_files_exist(&[present.clone()]).is_ok());

        let err = validate_files_exist(&[present, "no/such/file.csv".to_string()]).unwrap_err();
        assert!(matches!(err, PayrollError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();
        assert!(validate_files_exist(&[path]).is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter("delimiter", ',').is_ok());
        assert!(validate_delimiter("delimiter", '\t').is_ok());
        assert!(validate_delimiter("delimiter", '\n').is_err());
        assert!(validate_delimiter("delimiter", '\r').is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty_string("rates.aliases", "rate").is_ok());
        assert!(validate_non_empty_string("rates.aliases", "  ").is_err());
        assert!(validate_non_empty_list::<String>("files", &[]).is_err());
    }
}
