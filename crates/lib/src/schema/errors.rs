//! Error types for schema construction.
//!
//! A [`SchemaError`] describes a structural defect in a mapped type. These errors
//! are raised while a [`Schema`](super::Schema) is being built, before any
//! configuration tree is looked at.

use thiserror::Error;

/// Structural defects detected while building a schema.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two option fields resolve to the same (section, option) pair
    #[error("Option '{name}' in section '{section}' is mapped more than once")]
    DuplicateOption { section: String, name: String },

    /// Two section fields resolve to the same section name
    #[error("Section '{name}' is mapped by more than one section field")]
    DuplicateSection { name: String },

    /// An option outside a section field targets the section that field owns
    #[error("Field '{field}' targets section '{section}', which belongs to a section field")]
    SectionCollision { section: String, field: String },

    /// A section field's type contains itself, directly or transitively
    #[error("Section type {type_name} contains itself")]
    CyclicSection { type_name: String },

    /// A default value was declared on a field that is not optional
    #[error("Field '{field}' declares a default value but is not optional")]
    DefaultOnRequired { field: String },

    /// A field resolves to an empty option or section name
    #[error("Field '{field}' resolves to an empty name")]
    InvalidName { field: String },
}

impl SchemaError {
    /// Check if this error is caused by two fields mapping to the same node
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            SchemaError::DuplicateOption { .. }
                | SchemaError::DuplicateSection { .. }
                | SchemaError::SectionCollision { .. }
        )
    }

    /// Check if this error is caused by recursive section nesting
    pub fn is_cycle(&self) -> bool {
        matches!(self, SchemaError::CyclicSection { .. })
    }

    /// Get the offending field, when the error is attributed to one
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::SectionCollision { field, .. }
            | SchemaError::DefaultOnRequired { field }
            | SchemaError::InvalidName { field } => Some(field),
            _ => None,
        }
    }
}

impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err)
    }
}
