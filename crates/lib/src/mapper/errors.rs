//! Error types for mapping operations.
//!
//! A [`MappingError`] is raised when a configuration tree cannot be mapped onto a
//! type, or a value cannot be mapped into a tree. The engine fails on the first
//! error it meets; no partial object or tree is returned alongside it.

use thiserror::Error;

/// Failures raised while loading or saving a mapped type.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The mapped type has no registered constructor
    #[error("Cannot instantiate {type_name}: no constructor registered")]
    Instantiation { type_name: String },

    /// A required option is absent
    #[error("Missing required option '{name}' in section '{section}'")]
    MissingOption { section: String, name: String },

    /// A required section is absent
    #[error("Missing required section '{section}'")]
    MissingSection { section: String },

    /// Stored text cannot be coerced into the declared type
    #[error(
        "Option '{name}' in section '{section}' (field '{field}'): expected {expected}, found '{raw}'"
    )]
    TypeMismatch {
        section: String,
        name: String,
        field: String,
        expected: String,
        raw: String,
    },
}

impl MappingError {
    /// Check if this error is caused by an absent required node
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            MappingError::MissingOption { .. } | MappingError::MissingSection { .. }
        )
    }

    /// Check if this error is a type coercion failure
    pub fn is_type_error(&self) -> bool {
        matches!(self, MappingError::TypeMismatch { .. })
    }

    /// Check if this error is caused by a type that cannot be constructed
    pub fn is_instantiation_error(&self) -> bool {
        matches!(self, MappingError::Instantiation { .. })
    }

    /// Get the section involved, if the error is about a tree node
    pub fn section(&self) -> Option<&str> {
        match self {
            MappingError::MissingOption { section, .. }
            | MappingError::MissingSection { section }
            | MappingError::TypeMismatch { section, .. } => Some(section),
            MappingError::Instantiation { .. } => None,
        }
    }

    /// Get the option name involved, if the error is about an option
    pub fn option(&self) -> Option<&str> {
        match self {
            MappingError::MissingOption { name, .. } | MappingError::TypeMismatch { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }
}

impl From<MappingError> for crate::Error {
    fn from(err: MappingError) -> Self {
        crate::Error::Mapping(err)
    }
}
