use crate::domain::model::Level;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from '{resource}'")]
    HttpStatus { resource: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{level} selection rejected: {reason}")]
    SelectionRejected { level: Level, reason: String },
}

impl PickerError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PickerError::ApiError(_) | PickerError::HttpStatus { .. } => {
                "Could not reach the reference data service".to_string()
            }
            PickerError::ConfigError { .. }
            | PickerError::ConfigValidationError { .. }
            | PickerError::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            PickerError::SelectionRejected { level, reason } => {
                format!("Cannot change {}: {}", level, reason)
            }
            _ => self.to_string(),
        }
    }

    pub(crate) fn rejected(level: Level, reason: impl Into<String>) -> Self {
        PickerError::SelectionRejected {
            level,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;
