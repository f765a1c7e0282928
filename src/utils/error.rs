use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to parse {source_name} row {row}: {reason}")]
    ParseError {
        source_name: String,
        row: usize,
        reason: String,
    },

    #[error("No listings match the requested neighborhood, capacity and price")]
    EmptyCandidateSet,

    #[error("No incident reports fall inside the padded region of the candidates")]
    InsufficientData,

    #[error("Neighborhood '{neighborhood}' has no listings for the requested capacity")]
    UndefinedAggregate { neighborhood: String },

    #[error("Neighborhood '{neighborhood}' is not in the neighborhood list")]
    UnknownNeighborhood { neighborhood: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Analysis,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScoutError::CsvError(_) | ScoutError::ParseError { .. } => ErrorCategory::Input,
            ScoutError::EmptyCandidateSet
            | ScoutError::InsufficientData
            | ScoutError::UndefinedAggregate { .. }
            | ScoutError::UnknownNeighborhood { .. } => ErrorCategory::Analysis,
            ScoutError::ZipError(_) | ScoutError::IoError(_) | ScoutError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    /// 分析條件屬於使用者可處理的結果，不是系統故障
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Analysis => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScoutError::EmptyCandidateSet => {
                "Raise the maximum price, change the group size or pick another neighborhood"
                    .to_string()
            }
            ScoutError::InsufficientData => {
                "Use an incident dataset that covers the chosen neighborhood or widen the padding"
                    .to_string()
            }
            ScoutError::UndefinedAggregate { .. } => {
                "Try a different group size; no listing in this neighborhood fits it".to_string()
            }
            ScoutError::UnknownNeighborhood { .. } => {
                "Run with --list-neighborhoods to see the valid names".to_string()
            }
            ScoutError::ParseError { .. } | ScoutError::CsvError(_) => {
                "Check the file headers and the --delimiter setting".to_string()
            }
            ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. }
            | ScoutError::MissingConfigError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            ScoutError::IoError(_) => "Check that the paths exist and are readable".to_string(),
            ScoutError::ZipError(_) | ScoutError::SerializationError(_) => {
                "Check free disk space and write permissions on the output path".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoutError::EmptyCandidateSet => "No listings match your preferences.".to_string(),
            ScoutError::InsufficientData => {
                "Not enough incident data near your matches to rate their safety.".to_string()
            }
            ScoutError::UndefinedAggregate { neighborhood } => format!(
                "{} has no listings for that many guests, so its average price is unknown.",
                neighborhood
            ),
            ScoutError::UnknownNeighborhood { neighborhood } => {
                format!("'{}' is not a known neighborhood.", neighborhood)
            }
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for ScoutError {
    fn from(err: toml::de::Error) -> Self {
        ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
