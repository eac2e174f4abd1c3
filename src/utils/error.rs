use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("{message}")]
    FetchError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ScraperError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FetchError { .. } | Self::HttpError(_) => ErrorSeverity::Medium,
            Self::CsvError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FetchError { message } => format!("Could not load the wiki page: {}", message),
            Self::HttpError(_) => "Network request to the proxy failed".to_string(),
            Self::CsvError(_) => "Could not write the CSV export".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(_) => "Could not write the JSON snapshot".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ProcessingError { message } => format!("Could not process the data: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing '{}'", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FetchError { .. } | Self::HttpError(_) => {
                "Check the wiki URL and proxy endpoint, or pass --input-file with a saved page"
            }
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::ProcessingError { .. }
            | Self::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the command line flags or the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
