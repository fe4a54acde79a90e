//! JSON format adapter.
//!
//! A document is an object of sections, each an object of options:
//!
//! ```json
//! {
//!   "": { "verbose": "yes" },
//!   "server": { "host": "localhost", "port": 8080, "aliases": ["www", "api"] }
//! }
//! ```
//!
//! Strings are scalars and arrays are lists. Numbers and booleans are accepted
//! and stored as their text; output always uses strings. Section and option
//! order is preserved in both directions.

use std::io::{Read, Write};

use serde_json::{Map, Value};
use tracing::trace;

use super::{ConfigAdapter, ConfigurationError};
use crate::tree::{ConfigOption, NodeValue, Root, Section};

/// Reads and writes JSON documents.
#[derive(Debug, Clone, Copy)]
pub struct JsonAdapter {
    pretty: bool,
}

impl JsonAdapter {
    /// Creates an adapter producing pretty-printed output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Creates an adapter producing single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Converts a parsed JSON document into a tree.
    pub fn decode(&self, value: Value) -> Result<Root, ConfigurationError> {
        let document = match value {
            Value::Object(document) => document,
            other => {
                return Err(malformed(format!(
                    "expected an object of sections, found {}",
                    kind(&other)
                )));
            }
        };

        let mut sections = Vec::with_capacity(document.len());
        for (section_name, section_value) in document {
            let options = match section_value {
                Value::Object(options) => options,
                other => {
                    return Err(malformed(format!(
                        "section '{section_name}' must be an object, found {}",
                        kind(&other)
                    )));
                }
            };

            let mut section = Section::empty(section_name.as_str());
            for (name, value) in options {
                let node = to_node(&section_name, &name, value)?;
                section.insert(ConfigOption::new(name, node));
            }
            sections.push(section);
        }

        trace!(sections = sections.len(), "Parsed JSON document");
        Ok(Root::new("", sections))
    }

    /// Converts a tree into a JSON document.
    pub fn encode(&self, root: &Root) -> Value {
        let mut document = Map::with_capacity(root.len());
        for section in root {
            let mut options = Map::with_capacity(section.len());
            for option in section {
                let value = match option.value() {
                    NodeValue::Scalar(text) => Value::String(text.clone()),
                    NodeValue::List(items) => {
                        Value::Array(items.iter().cloned().map(Value::String).collect())
                    }
                };
                options.insert(option.name().to_string(), value);
            }
            document.insert(section.name().to_string(), Value::Object(options));
        }
        Value::Object(document)
    }
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigAdapter for JsonAdapter {
    fn read(&self, reader: &mut dyn Read) -> Result<Root, ConfigurationError> {
        let value: Value = serde_json::from_reader(reader)?;
        self.decode(value)
    }

    fn write(&self, root: &Root, writer: &mut dyn Write) -> Result<(), ConfigurationError> {
        let value = self.encode(root);
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &value)?;
        } else {
            serde_json::to_writer(&mut *writer, &value)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn to_node(section: &str, name: &str, value: Value) -> Result<NodeValue, ConfigurationError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                scalar_text(item).ok_or_else(|| {
                    malformed(format!(
                        "list '{name}' in section '{section}' may only hold strings, numbers or booleans"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodeValue::List),
        other => {
            let found = kind(&other);
            scalar_text(other).map(NodeValue::Scalar).ok_or_else(|| {
                malformed(format!(
                    "option '{name}' in section '{section}' must be a string, number, boolean or array, found {found}"
                ))
            })
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn malformed(reason: String) -> ConfigurationError {
    ConfigurationError::Malformed { reason }
}
