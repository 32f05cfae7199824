use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Which of the two external datasets an operation was talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Live,
    Reference,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Live => f.write_str("current"),
            DatasetKind::Reference => f.write_str("reference"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("failed to fetch {dataset} turnout data (status {status})")]
    Retrieval {
        dataset: DatasetKind,
        status: StatusCode,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("payload deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("no municipality matched the query")]
    NoMatch,

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("data processing error: {message}")]
    Processing { message: String },
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LookupError::NoMatch => ErrorSeverity::Low,
            LookupError::Retrieval { .. } | LookupError::Http(_) => ErrorSeverity::Medium,
            LookupError::Serialization(_)
            | LookupError::Csv(_)
            | LookupError::Io(_)
            | LookupError::Processing { .. } => ErrorSeverity::High,
            LookupError::Toml(_)
            | LookupError::InvalidConfigValue { .. }
            | LookupError::MissingConfig { .. } => ErrorSeverity::Critical,
        }
    }

    /// Message shown to the end user. The failing dataset is only named in
    /// the logged error, never here.
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::Retrieval { .. } | LookupError::Http(_) => {
                "Something went wrong while fetching the turnout data. Please try again later."
            }
            LookupError::NoMatch => {
                "Could not find that municipality. Try typing just the municipality name."
            }
            LookupError::Toml(_)
            | LookupError::InvalidConfigValue { .. }
            | LookupError::MissingConfig { .. } => {
                "The configuration is invalid. Check the source endpoint settings."
            }
            _ => "Something unexpected went wrong. Please try again later.",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::Retrieval { .. } | LookupError::Http(_) => {
                "Verify the source endpoints are reachable and re-run the lookup"
            }
            LookupError::NoMatch => "Simplify the query, e.g. \"aarhus\" instead of a full address",
            LookupError::Toml(_)
            | LookupError::InvalidConfigValue { .. }
            | LookupError::MissingConfig { .. } => {
                "Fix the CLI flags or the [sources] section of the config file"
            }
            _ => "Re-run the command; if the problem persists the upstream data may be malformed",
        }
    }
}
