//! Error types for format adapters.
//!
//! A [`ConfigurationError`] is raised when bytes cannot be turned into a
//! configuration tree, or a tree cannot be written in a given format.

use thiserror::Error;

/// Failures raised while reading or writing a configuration format.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The underlying reader or writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed
    #[error("Syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    /// A section header appears more than once
    #[error("Duplicate section '{section}' on line {line}")]
    DuplicateSection { line: usize, section: String },

    /// An option appears more than once within a section
    #[error("Duplicate option '{name}' in section '{section}' on line {line}")]
    DuplicateOption {
        line: usize,
        section: String,
        name: String,
    },

    /// The document parsed but does not have the shape of a configuration tree
    #[error("Malformed configuration: {reason}")]
    Malformed { reason: String },

    /// The tree holds something the format cannot express
    #[error("Cannot represent configuration: {reason}")]
    Unrepresentable { reason: String },

    /// The JSON document could not be parsed or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// Check if this error is caused by invalid input text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ConfigurationError::Syntax { .. }
                | ConfigurationError::Malformed { .. }
                | ConfigurationError::Json(_)
        )
    }

    /// Check if this error is caused by a repeated section or option
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            ConfigurationError::DuplicateSection { .. }
                | ConfigurationError::DuplicateOption { .. }
        )
    }

    /// Check if this error is an I/O failure
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigurationError::Io(_))
    }

    /// Get the line the error was found on, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            ConfigurationError::Syntax { line, .. }
            | ConfigurationError::DuplicateSection { line, .. }
            | ConfigurationError::DuplicateOption { line, .. } => Some(*line),
            ConfigurationError::Json(err) if err.line() > 0 => Some(err.line()),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for crate::Error {
    fn from(err: ConfigurationError) -> Self {
        crate::Error::Configuration(err)
    }
}
