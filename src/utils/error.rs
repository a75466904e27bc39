use crate::domain::model::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InputError(#[from] ValidationErrors),

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Share failed: {message}")]
    ShareError { message: String },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Share,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::InputError(_) | IntakeError::UnknownCommand { .. } => ErrorCategory::Input,
            IntakeError::ConfigValidationError { .. }
            | IntakeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            IntakeError::IoError(_)
            | IntakeError::StorageError { .. }
            | IntakeError::ZipError(_) => ErrorCategory::Storage,
            IntakeError::ShareError { .. } => ErrorCategory::Share,
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Share => ErrorSeverity::Low,
            ErrorCategory::Configuration | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::InputError(_) => {
                "Enter a weight between 1 and 300 kg and choose low, medium or high activity"
            }
            IntakeError::UnknownCommand { .. } => "Type 'help' to list the available commands",
            IntakeError::ConfigValidationError { .. } => {
                "Check that the configuration file is valid TOML"
            }
            IntakeError::InvalidConfigValueError { .. } => {
                "Fix the highlighted configuration value and try again"
            }
            IntakeError::IoError(_) | IntakeError::StorageError { .. } => {
                "Make sure the data directory exists and is writable"
            }
            IntakeError::ZipError(_) => "Check the export path and available disk space",
            IntakeError::ShareError { .. } => "Copy the result manually or try another share target",
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => {
                "The stored data may be corrupted; clear the history and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::InputError(errors) => errors.to_string(),
            IntakeError::StorageError { key, .. } => {
                format!("Could not access saved data ({})", key)
            }
            IntakeError::ShareError { .. } => "Sharing failed".to_string(),
            other => other.to_string(),
        }
    }

    pub fn storage(key: &str, message: impl Into<String>) -> Self {
        IntakeError::StorageError {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
