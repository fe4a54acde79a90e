//! Format adapters.
//!
//! An adapter turns a byte stream into a configuration [`Root`] and back. The
//! mapping engine never touches bytes, so any format that can express sections
//! of named scalar and list options can be plugged in by implementing
//! [`ConfigAdapter`].
//!
//! Two adapters ship with the crate:
//!
//! - [`IniAdapter`]: `[section]` headers and `key = value` lines
//! - [`JsonAdapter`]: an object of sections, each an object of options
//!
//! [`Format`] names the built-in adapters so callers can pick one at runtime.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::tree::Root;

pub mod errors;
mod ini;
mod json;

pub use errors::ConfigurationError;
pub use ini::IniAdapter;
pub use json::JsonAdapter;

/// Reads and writes configuration trees in one concrete format.
pub trait ConfigAdapter: Send + Sync {
    /// Parses a complete document from `reader`.
    fn read(&self, reader: &mut dyn Read) -> Result<Root, ConfigurationError>;

    /// Writes `root` as a complete document to `writer`.
    fn write(&self, root: &Root, writer: &mut dyn Write) -> Result<(), ConfigurationError>;
}

impl<A: ConfigAdapter + ?Sized> ConfigAdapter for Box<A> {
    fn read(&self, reader: &mut dyn Read) -> Result<Root, ConfigurationError> {
        (**self).read(reader)
    }

    fn write(&self, root: &Root, writer: &mut dyn Write) -> Result<(), ConfigurationError> {
        (**self).write(root, writer)
    }
}

/// The built-in configuration formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Ini,
    Json,
}

impl Format {
    /// Returns a boxed adapter for this format.
    pub fn adapter(self) -> Box<dyn ConfigAdapter> {
        match self {
            Format::Ini => Box::new(IniAdapter::new()),
            Format::Json => Box::new(JsonAdapter::new()),
        }
    }

    /// Infers the format from a file extension.
    ///
    /// `.ini`, `.cfg` and `.conf` are INI; `.json` is JSON. Matching is
    /// case-insensitive.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "ini" | "cfg" | "conf" => Some(Format::Ini),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Ini => "ini",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ini" => Ok(Format::Ini),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format '{other}' (expected 'ini' or 'json')")),
        }
    }
}
