use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error codes reported to callers of the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "KER-IOV-001")]
    InvalidInputParameter,
    #[serde(rename = "KER-IOV-003")]
    IdObjectValidationFailed,
    #[serde(rename = "KER-IOV-004")]
    IdObjectIoException,
    #[serde(rename = "KER-IOV-005")]
    UnsupportedValueType,
    #[serde(rename = "KER-IOV-006")]
    RuleEvaluationFailed,
}

impl ErrorCode {
    /// The wire code, e.g. `KER-IOV-001`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::InvalidInputParameter => "KER-IOV-001",
            ErrorCode::IdObjectValidationFailed => "KER-IOV-003",
            ErrorCode::IdObjectIoException => "KER-IOV-004",
            ErrorCode::UnsupportedValueType => "KER-IOV-005",
            ErrorCode::RuleEvaluationFailed => "KER-IOV-006",
        }
    }

    /// Message text with `subject` substituted where the template takes one.
    pub fn message(self, subject: &str) -> String {
        match self {
            ErrorCode::InvalidInputParameter => format!("Invalid Input Parameter - {}", subject),
            ErrorCode::IdObjectValidationFailed => "Failed to validate json".to_string(),
            ErrorCode::IdObjectIoException => {
                "Failed to serialize or read identity object".to_string()
            }
            ErrorCode::UnsupportedValueType => format!("Unsupported value type at - {}", subject),
            ErrorCode::RuleEvaluationFailed => {
                format!("Failed to evaluate validation rule - {}", subject)
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single data-quality violation found in an identity document.
///
/// `location` is the normalized slash-separated path (`a/b/2/c`) of the
/// offending value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub location: String,
}

impl ValidationError {
    /// Builds an error whose message interpolates `location`.
    pub fn new(code: ErrorCode, location: impl Into<String>) -> Self {
        let location = location.into();
        ValidationError {
            code: code.code().to_string(),
            message: code.message(&location),
            location,
        }
    }

    pub fn invalid_input(location: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInputParameter, location)
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.code == code.code()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.location, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Malformed rule definitions detected while loading configuration.
///
/// Fatal at startup: an engine is never built from a partially valid rule set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("invalid path query '{query}': {message}")]
    InvalidPathQuery { query: String, message: String },

    #[error("invalid pattern '{pattern}' for path query '{query}': {message}")]
    InvalidPattern {
        query: String,
        pattern: String,
        message: String,
    },

    #[error("failed to parse validator configuration: {0}")]
    Parse(String),

    #[error("failed to read validator configuration {path}: {message}")]
    Read { path: String, message: String },
}

/// The identity object could not be turned into a JSON document.
#[derive(Debug, thiserror::Error)]
pub enum IdObjectIoError {
    #[error("failed to serialize identity object: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("identity document is not valid JSON: {0}")]
    Document(#[source] serde_json::Error),
}

impl IdObjectIoError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::IdObjectIoException
    }
}

/// A rejected document: every violation found, never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{code}: Failed to validate json ({} error(s))", .errors.len())]
pub struct ValidationFailure {
    code: ErrorCode,
    errors: Vec<ValidationError>,
}

impl ValidationFailure {
    /// Returns `None` for an empty list.
    pub(crate) fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationFailure {
                code: ErrorCode::IdObjectValidationFailed,
                errors,
            })
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// All messages joined for a single user-facing response.
    pub fn error_texts(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
