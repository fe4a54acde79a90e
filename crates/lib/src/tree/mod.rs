//! In-memory configuration tree.
//!
//! A configuration is represented as a [`Root`] holding an ordered list of
//! [`Section`]s, each of which holds an ordered list of [`ConfigOption`]s.
//! The tree stores text only: turning that text into typed values is the job of
//! the [`mapper`](crate::mapper), and turning bytes into a tree is the job of an
//! [`adapter`](crate::adapter).
//!
//! # Uniqueness
//!
//! Section names are unique within a root and option names are unique within a
//! section. The tree keeps that invariant by construction:
//!
//! - inserting an option whose name already exists replaces its value in place
//! - building a root from sections that share a name merges them in order
//!
//! # Equality
//!
//! Two trees are equal when their names match and they contain the same
//! sections with the same options and values. Ordering is preserved for output
//! but ignored by `==`.
//!
//! ```
//! use confmap::tree::{ConfigOption, Root, Section};
//!
//! let a = Root::new("", vec![Section::new("net", vec![
//!     ConfigOption::scalar("host", "localhost"),
//!     ConfigOption::scalar("port", "8080"),
//! ])]);
//! let b = Root::new("", vec![Section::new("net", vec![
//!     ConfigOption::scalar("port", "8080"),
//!     ConfigOption::scalar("host", "localhost"),
//! ])]);
//! assert_eq!(a, b);
//! ```

use std::fmt;

use serde::Serialize;


/// Name of the unnamed section that holds options declared without a section.
pub const DEFAULT_SECTION: &str = "";

/// The value stored in a [`ConfigOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    /// A single text value
    Scalar(String),
    /// An ordered sequence of text values
    List(Vec<String>),
}

impl NodeValue {
    /// Returns the text of a scalar value
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            NodeValue::Scalar(s) => Some(s),
            NodeValue::List(_) => None,
        }
    }

    /// Returns the items of a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            NodeValue::List(items) => Some(items),
            NodeValue::Scalar(_) => None,
        }
    }

    /// Returns true if this is a list value
    pub fn is_list(&self) -> bool {
        matches!(self, NodeValue::List(_))
    }

    /// Returns the kind of node as a string
    pub fn kind(&self) -> &'static str {
        match self {
            NodeValue::Scalar(_) => "scalar",
            NodeValue::List(_) => "list",
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Scalar(s) => write!(f, "{s}"),
            NodeValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::Scalar(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for NodeValue {
    fn from(value: Vec<String>) -> Self {
        NodeValue::List(value)
    }
}

/// A named option inside a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigOption {
    name: String,
    value: NodeValue,
}

impl ConfigOption {
    pub fn new(name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a scalar option.
    pub fn scalar(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, NodeValue::Scalar(value.into()))
    }

    /// Creates a list option from any sequence of text values.
    pub fn list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            NodeValue::List(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn into_value(self) -> NodeValue {
        self.value
    }
}

/// A named group of options.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Section {
    name: String,
    options: Vec<ConfigOption>,
}

impl Section {
    /// Creates a section from a list of options.
    ///
    /// Later options replace earlier ones with the same name.
    pub fn new(name: impl Into<String>, options: impl IntoIterator<Item = ConfigOption>) -> Self {
        let mut section = Self {
            name: name.into(),
            options: Vec::new(),
        };
        for option in options {
            section.insert(option);
        }
        section
    }

    /// Creates a section with no options.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Looks up an option value by name.
    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.option(name).map(ConfigOption::value)
    }

    /// Looks up an option by name.
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Inserts an option, returning the value it replaced.
    ///
    /// A replaced option keeps its position.
    pub fn insert(&mut self, option: ConfigOption) -> Option<NodeValue> {
        match self.options.iter_mut().find(|o| o.name == option.name) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, option.value)),
            None => {
                self.options.push(option);
                None
            }
        }
    }

    /// Removes an option by name.
    pub fn remove(&mut self, name: &str) -> Option<ConfigOption> {
        let index = self.options.iter().position(|o| o.name == name)?;
        Some(self.options.remove(index))
    }

    /// Inserts every option of `other`, replacing same-named options.
    pub fn merge(&mut self, other: Section) {
        for option in other.options {
            self.insert(option);
        }
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.options.len() == other.options.len()
            && self
                .options
                .iter()
                .all(|o| other.get(&o.name) == Some(&o.value))
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a ConfigOption;
    type IntoIter = std::slice::Iter<'a, ConfigOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

/// The root of a configuration tree.
#[derive(Debug, Clone, Default, Eq, Serialize)]
pub struct Root {
    name: String,
    sections: Vec<Section>,
}

impl Root {
    /// Creates a root from a list of sections.
    ///
    /// Sections sharing a name are merged in order.
    pub fn new(name: impl Into<String>, sections: impl IntoIterator<Item = Section>) -> Self {
        let mut root = Self {
            name: name.into(),
            sections: Vec::new(),
        };
        for section in sections {
            root.insert_section(section);
        }
        root
    }

    /// Creates an unnamed root with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Returns the named section, appending an empty one if it does not exist.
    pub fn section_or_insert(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::empty(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Adds a section, merging it into an existing section of the same name.
    pub fn insert_section(&mut self, section: Section) {
        match self.section_mut(&section.name) {
            Some(existing) => existing.merge(section),
            None => self.sections.push(section),
        }
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let index = self.sections.iter().position(|s| s.name == name)?;
        Some(self.sections.remove(index))
    }

    /// Looks up the value of `option` inside `section`.
    pub fn get(&self, section: &str, option: &str) -> Option<&NodeValue> {
        self.section(section)?.get(option)
    }

    /// Inserts an option into a section, creating the section on demand.
    pub fn insert_option(&mut self, section: &str, option: ConfigOption) -> Option<NodeValue> {
        self.section_or_insert(section).insert(option)
    }

    /// Overlays `other` onto this tree.
    ///
    /// Options present in `other` replace same-named options here; sections and
    /// options only present in `other` are appended. Nothing is removed.
    pub fn merge(&mut self, other: Root) {
        for section in other.sections {
            self.insert_section(section);
        }
    }

    /// Drops every section that has no options.
    pub fn prune_empty(&mut self) {
        self.sections.retain(|s| !s.is_empty());
    }

    /// Total number of options across all sections.
    pub fn option_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .all(|s| other.section(&s.name) == Some(s))
    }
}

impl<'a> IntoIterator for &'a Root {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
