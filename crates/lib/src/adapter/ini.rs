//! INI format adapter.
//!
//! Syntax accepted by [`IniAdapter::read`]:
//!
//! ```ini
//! ; options before the first header go to the default section
//! verbose = yes
//!
//! [server]
//! host = localhost
//! port: 8080
//! # a comma outside an escape makes a list
//! aliases = www, api, mail
//! motto = hello\, world
//! ```
//!
//! - Comments are full lines starting with `;` or `#`.
//! - Keys and values are trimmed. `=` and `:` both separate a key from its value;
//!   whichever comes first wins.
//! - `\,` is a literal comma and `\\` a literal backslash. Any other backslash
//!   is kept as written.
//! - A header or a key appearing twice in the same scope is an error.
//!
//! A one-element list is written without a comma and therefore reads back as a
//! scalar. The mapping engine accepts a scalar for a list field, so mapped
//! values still round-trip. Values the reader would change, such as text with
//! surrounding whitespace, are rejected as
//! [`Unrepresentable`](ConfigurationError::Unrepresentable) when writing.

use std::io::{Read, Write};

use tracing::trace;

use super::{ConfigAdapter, ConfigurationError};
use crate::tree::{ConfigOption, DEFAULT_SECTION, NodeValue, Root, Section};

/// Reads and writes INI documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniAdapter;

impl IniAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Parses an INI document held in memory.
    pub fn parse(&self, text: &str) -> Result<Root, ConfigurationError> {
        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<usize> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| ConfigurationError::Syntax {
                        line: line_no,
                        reason: "section header is missing ']'".to_string(),
                    })?
                    .trim();
                if name.is_empty() {
                    return Err(ConfigurationError::Syntax {
                        line: line_no,
                        reason: "empty section name".to_string(),
                    });
                }
                if sections.iter().any(|s| s.name() == name) {
                    return Err(ConfigurationError::DuplicateSection {
                        line: line_no,
                        section: name.to_string(),
                    });
                }
                sections.push(Section::empty(name));
                current = Some(sections.len() - 1);
                continue;
            }

            let split = line
                .find(['=', ':'])
                .ok_or_else(|| ConfigurationError::Syntax {
                    line: line_no,
                    reason: "expected 'key = value'".to_string(),
                })?;
            let key = line[..split].trim();
            if key.is_empty() {
                return Err(ConfigurationError::Syntax {
                    line: line_no,
                    reason: "missing option name".to_string(),
                });
            }
            let value = parse_value(line[split + 1..].trim());

            let index = match current {
                Some(index) => index,
                None => {
                    // Options before any header live in the default section
                    sections.push(Section::empty(DEFAULT_SECTION));
                    current = Some(sections.len() - 1);
                    sections.len() - 1
                }
            };
            let section = &mut sections[index];
            if section.contains(key) {
                return Err(ConfigurationError::DuplicateOption {
                    line: line_no,
                    section: section.name().to_string(),
                    name: key.to_string(),
                });
            }
            section.insert(ConfigOption::new(key, value));
        }

        trace!(sections = sections.len(), "Parsed INI document");
        Ok(Root::new("", sections))
    }

    /// Renders `root` as an INI document.
    pub fn render(&self, root: &Root) -> Result<String, ConfigurationError> {
        let mut out = String::new();

        if let Some(default) = root.section(DEFAULT_SECTION) {
            write_options(&mut out, default)?;
        }

        for section in root.iter().filter(|s| s.name() != DEFAULT_SECTION) {
            check_section_name(section.name())?;
            if !out.is_empty() {
                out.push('\n');
            }
            out.push('[');
            out.push_str(section.name());
            out.push_str("]\n");
            write_options(&mut out, section)?;
        }

        Ok(out)
    }
}

impl ConfigAdapter for IniAdapter {
    fn read(&self, reader: &mut dyn Read) -> Result<Root, ConfigurationError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse(&text)
    }

    fn write(&self, root: &Root, writer: &mut dyn Write) -> Result<(), ConfigurationError> {
        let text = self.render(root)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Splits a trimmed value on unescaped commas.
fn parse_value(raw: &str) -> NodeValue {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ (',' | '\\')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if items.is_empty() {
        NodeValue::Scalar(current)
    } else {
        items.push(current);
        NodeValue::List(items.iter().map(|item| item.trim().to_string()).collect())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, ',' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn write_options(out: &mut String, section: &Section) -> Result<(), ConfigurationError> {
    for option in section {
        check_option_name(section.name(), option.name())?;
        check_value(section.name(), option)?;
        let rendered = match option.value() {
            NodeValue::Scalar(text) => escape(text),
            NodeValue::List(items) => items
                .iter()
                .map(|item| escape(item))
                .collect::<Vec<_>>()
                .join(", "),
        };
        if rendered.contains(['\n', '\r']) {
            return Err(ConfigurationError::Unrepresentable {
                reason: format!(
                    "value of option '{}' in section '{}' spans several lines",
                    option.name(),
                    section.name()
                ),
            });
        }
        out.push_str(option.name());
        out.push_str(" = ");
        out.push_str(&rendered);
        out.push('\n');
    }
    Ok(())
}

/// Rejects values the reader would not reproduce: surrounding whitespace is
/// trimmed away, and a list holding one empty item reads back as an empty
/// scalar.
fn check_value(section: &str, option: &ConfigOption) -> Result<(), ConfigurationError> {
    let reason = match option.value() {
        NodeValue::Scalar(text) if text.trim() != text => "has leading or trailing whitespace",
        NodeValue::List(items) if items.iter().any(|item| item.trim() != item) => {
            "has a list item with leading or trailing whitespace"
        }
        NodeValue::List(items) if items.len() == 1 && items[0].is_empty() => {
            "is a list holding a single empty item"
        }
        _ => return Ok(()),
    };
    Err(ConfigurationError::Unrepresentable {
        reason: format!(
            "value of option '{}' in section '{section}' {reason}",
            option.name()
        ),
    })
}

fn check_section_name(name: &str) -> Result<(), ConfigurationError> {
    if name.trim() != name || name.contains(['[', ']', '\n', '\r']) {
        return Err(ConfigurationError::Unrepresentable {
            reason: format!("section name '{name}' cannot be written as an INI header"),
        });
    }
    Ok(())
}

fn check_option_name(section: &str, name: &str) -> Result<(), ConfigurationError> {
    let invalid = name.is_empty()
        || name.trim() != name
        || name.contains(['=', ':', '\n', '\r'])
        || name.starts_with(['[', ';', '#']);
    if invalid {
        return Err(ConfigurationError::Unrepresentable {
            reason: format!("option name '{name}' in section '{section}' cannot be written as an INI key"),
        });
    }
    Ok(())
}
