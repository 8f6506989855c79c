use crate::domain::model::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Error: could not open file '{path}'.")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    MalformedRecord(#[from] ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::SourceUnavailable { .. } => ErrorCategory::Source,
            PlannerError::MalformedRecord(_) | PlannerError::CsvError(_) => ErrorCategory::Data,
            PlannerError::ConfigError { .. }
            | PlannerError::MissingConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::IoError(_) | PlannerError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 來源或資料錯誤可以換一個檔案重試，系統錯誤則無法恢復
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Source => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlannerError::SourceUnavailable { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            PlannerError::MalformedRecord(e) => format!(
                "Every non-blank line needs at least a course number and a title; fix record {}",
                e.line
            ),
            PlannerError::CsvError(_) => "Make sure the file is UTF-8 encoded text".to_string(),
            PlannerError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
            PlannerError::IoError(_) | PlannerError::SerializationError(_) => {
                "Retry the command; if it keeps failing, check the terminal and disk".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::SourceUnavailable { .. } | PlannerError::MalformedRecord(_) => {
                self.to_string()
            }
            PlannerError::CsvError(e) => format!("The course file could not be read: {}", e),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_message() {
        let err = PlannerError::SourceUnavailable {
            path: "missing.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(err.to_string(), "Error: could not open file 'missing.csv'.");
        assert_eq!(err.category(), ErrorCategory::Source);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("missing.csv"));
    }

    #[test]
    fn test_malformed_record_message() {
        let err: PlannerError = ParseError::too_few_fields(4).into();

        assert_eq!(
            err.user_friendly_message(),
            "Parse error on line 4: expected at least 2 fields."
        );
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = PlannerError::MissingConfigError {
            field: "source.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("source.path"));
    }

    #[test]
    fn test_severity_follows_category() {
        let system = PlannerError::IoError(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ));
        assert_eq!(system.severity(), ErrorSeverity::Critical);

        let config = PlannerError::ConfigError {
            message: "bad toml".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert!(ErrorSeverity::Medium < ErrorSeverity::High);
        assert!(ErrorSeverity::High < ErrorSeverity::Critical);
    }
}
