//!
//! confmap: a bidirectional mapper between typed Rust structs and configuration trees.
//!
//! ## Core Concepts
//!
//! * **Configuration tree (`tree::Root`)**: A format-agnostic tree of named sections, each holding named
//!   scalar or list options. The tree stores text only.
//! * **Mapped types (`schema::Mapped`)**: Structs that register their fields, together with the section,
//!   name, optionality and default of each, on a `schema::SchemaBuilder`.
//! * **Schemas (`schema::Schema`)**: The validated, cached description of a mapped type.
//! * **Mapper (`mapper::ConfigMapper`)**: Loads a mapped type from a tree and saves it back, in strict or
//!   lenient mode.
//! * **Adapters (`adapter::ConfigAdapter`)**: Turn bytes into trees and back. INI and JSON are built in.
//! * **Facade (`facade::ConfigFacade`)**: Sequences an adapter and a mapper over readers, writers and files.
//!
//! ## Example
//!
//! ```
//! use confmap::adapter::IniAdapter;
//! use confmap::facade::ConfigFacade;
//! use confmap::mapper::LoadingMode;
//! use confmap::schema::{Mapped, SchemaBuilder};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct App {
//!     name: String,
//!     threads: Option<u32>,
//! }
//!
//! impl Mapped for App {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema.default_constructor();
//!         schema.option("name", |a| &a.name, |a| &mut a.name).section("app");
//!         schema
//!             .nullable_option("threads", |a| &a.threads, |a| &mut a.threads)
//!             .section("app")
//!             .optional()
//!             .default_value(4);
//!     }
//! }
//!
//! let facade = ConfigFacade::<App, _>::new(IniAdapter::new()).unwrap();
//! let app = facade
//!     .load(&mut "[app]\nname = demo\n".as_bytes(), LoadingMode::Strict)
//!     .unwrap();
//! assert_eq!(app, App { name: "demo".to_string(), threads: Some(4) });
//!
//! let mut out = Vec::new();
//! facade.save(&app, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "[app]\nname = demo\nthreads = 4\n");
//! ```

use std::path::PathBuf;

pub mod adapter;
pub mod facade;
pub mod mapper;
pub mod schema;
pub mod tree;

pub use adapter::{ConfigAdapter, ConfigurationError, Format};
pub use facade::ConfigFacade;
pub use mapper::{ConfigMapper, LoadingMode, MappingError};
pub use schema::{Mapped, Schema, SchemaBuilder, SchemaError};
pub use tree::{ConfigOption, NodeValue, Root, Section};

/// Result type used throughout the confmap library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the confmap library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be opened
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Structured schema errors from the schema module
    #[error(transparent)]
    Schema(schema::SchemaError),

    /// Structured mapping errors from the mapper module
    #[error(transparent)]
    Mapping(mapper::MappingError),

    /// Structured format errors from the adapter module
    #[error(transparent)]
    Configuration(adapter::ConfigurationError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Schema(_) => "schema",
            Error::Mapping(_) => "mapper",
            Error::Configuration(_) => "adapter",
            Error::NotFound { .. } => "facade",
            Error::Io(_) => "io",
        }
    }

    /// Check if this error indicates a file or required node was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Mapping(mapping_err) => mapping_err.is_missing(),
            _ => false,
        }
    }

    /// Check if this error is caused by a defective mapped type.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    /// Check if this error is mapping-related.
    pub fn is_mapping_error(&self) -> bool {
        matches!(self, Error::Mapping(_))
    }

    /// Check if this error is a value that could not be coerced.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Mapping(mapping_err) => mapping_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is caused by an unreadable or unwritable document.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Configuration(config_err) => config_err.is_io_error(),
            _ => false,
        }
    }
}
