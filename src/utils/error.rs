use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Invalid argument '{field}' = {value}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Could not parse '{field}' from '{value}': expected an integer")]
    ParseError { field: String, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidArgument,
    Configuration,
    Output,
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LabError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        LabError::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LabError::InvalidArgument { .. } | LabError::ParseError { .. } => {
                ErrorCategory::InvalidArgument
            }
            LabError::ConfigError { .. } | LabError::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            LabError::ZipError(_)
            | LabError::CsvError(_)
            | LabError::IoError(_)
            | LabError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::InvalidArgument => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                LabError::IoError(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::Medium,
            },
        }
    }

    /// 輸入錯誤在呼叫端可直接回報，不會重試
    pub fn is_invalid_argument(&self) -> bool {
        self.category() == ErrorCategory::InvalidArgument
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LabError::InvalidArgument { field, reason, .. } => {
                format!("Please enter a valid {}: {}", field.replace('_', " "), reason)
            }
            LabError::ParseError { field, .. } => {
                format!("Please enter a valid {}", field.replace('_', " "))
            }
            LabError::ConfigError { message } => format!("Configuration problem: {}", message),
            LabError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            LabError::ZipError(_) => "Could not build the export archive".to_string(),
            LabError::CsvError(_) => "Could not render the CSV report".to_string(),
            LabError::IoError(e) => format!("File system error: {}", e),
            LabError::SerializationError(_) => "Could not render the JSON report".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::InvalidArgument => {
                "Check the number you entered against the allowed range and try again".to_string()
            }
            ErrorCategory::Configuration => {
                "Fix the configuration file (see lab.toml) or remove the --config flag".to_string()
            }
            ErrorCategory::Output => {
                "Check that the output directory exists and is writable".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let e = LabError::invalid_argument("partition_count", 0, "must be at least 1");
        assert_eq!(
            e.to_string(),
            "Invalid argument 'partition_count' = 0: must be at least 1"
        );
        assert!(e.is_invalid_argument());
        assert_eq!(e.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_parse_error_is_invalid_argument_category() {
        let e = LabError::ParseError {
            field: "day".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::InvalidArgument);
        assert_eq!(e.user_friendly_message(), "Please enter a valid day");
    }

    #[test]
    fn test_io_error_is_critical() {
        let e = LabError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(e.category(), ErrorCategory::Output);
        assert_eq!(e.severity(), ErrorSeverity::Critical);
        assert!(!e.is_invalid_argument());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<LabError>();
    }
}
