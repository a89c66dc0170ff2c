use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to decode doctor list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("No doctor with id '{id}'")]
    NotFound { id: String },

    #[error("Unsupported export target: {path}")]
    UnsupportedExport { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::Http(_) | FinderError::HttpStatus { .. } => ErrorCategory::Network,
            FinderError::Decode(_) | FinderError::CsvError(_) => ErrorCategory::Data,
            FinderError::IoError(_) | FinderError::UnsupportedExport { .. } => ErrorCategory::Storage,
            FinderError::ConfigError { .. }
            | FinderError::ConfigValidationError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FinderError::NotFound { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::Http(e) if e.is_timeout() => {
                "The doctor directory did not answer in time".to_string()
            }
            FinderError::Http(_) => "Could not reach the doctor directory".to_string(),
            FinderError::HttpStatus { status, .. } => {
                format!("The doctor directory answered with HTTP {}", status)
            }
            FinderError::Decode(_) => "The doctor directory sent data we could not read".to_string(),
            FinderError::NotFound { id } => format!("There is no doctor with id {}", id),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the --endpoint URL",
            ErrorCategory::Data => "Make sure the endpoint returns a JSON array of doctor records",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Storage => "Use a writable export path ending in .json or .csv",
            ErrorCategory::Input => "Run `doctor-finder list` to see the available ids",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
