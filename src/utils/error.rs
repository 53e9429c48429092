use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Registry page {page} could not be fetched: {status} {reason}")]
    FetchError {
        page: u32,
        status: u16,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CheckError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CheckError::ApiError(_) | CheckError::FetchError { .. } => ErrorSeverity::Medium,
            CheckError::CsvError(_)
            | CheckError::SerializationError(_)
            | CheckError::ProcessingError { .. } => ErrorSeverity::High,
            CheckError::IoError(_) => ErrorSeverity::Critical,
            CheckError::UrlError(_)
            | CheckError::ConfigError { .. }
            | CheckError::MissingConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::ConfigValidationError { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CheckError::ApiError(_) | CheckError::FetchError { .. } => {
                "Check network access to the registry, or pass --registry-file with a saved page"
            }
            CheckError::CsvError(_) => "Check that the roster is comma separated text",
            CheckError::IoError(_) => {
                "Check that the roster exists and the output directory is writable"
            }
            CheckError::SerializationError(_) => "The registry returned unexpected JSON",
            CheckError::UrlError(_) => "Use a full http:// or https:// registry URL",
            CheckError::ConfigError { .. }
            | CheckError::MissingConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::ConfigValidationError { .. } => "Fix the reported setting and run again",
            CheckError::ProcessingError { .. } => "Inspect the input data for the reported record",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CheckError::IoError(e) => format!("Could not read or write a file: {}", e),
            CheckError::FetchError { page, status, .. } => {
                format!("The referee registry refused page {} (HTTP {})", page, status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
