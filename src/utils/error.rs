use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unknown report: {name}")]
    UnknownReport { name: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PayrollError {
    /// Process exit code the CLI uses for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PayrollError::FileNotFound { .. } => 1,
            PayrollError::UnknownReport { .. } => 2,
            PayrollError::ConfigError { .. } | PayrollError::InvalidConfigValueError { .. } => 1,
            PayrollError::IoError(_)
            | PayrollError::FileReadError { .. }
            | PayrollError::CsvError(_)
            | PayrollError::SerializationError(_) => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PayrollError::FileNotFound { path } => {
                format!("Input file not found: {}", path.display())
            }
            PayrollError::UnknownReport { name } => format!(
                "Report '{}' is not implemented. Available reports: {}",
                name,
                crate::core::reports::ReportKind::names().join(", ")
            ),
            PayrollError::FileReadError { path, .. } => {
                format!("Could not read input file {}", path.display())
            }
            PayrollError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PayrollError>;
