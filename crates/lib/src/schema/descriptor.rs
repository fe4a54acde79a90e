//! Type-erased, introspectable description of a mapped type.
//!
//! A [`Descriptor`] lists the fields of a mapped type in declaration order. It
//! carries everything the mapping rules need except the typed accessors, which
//! live in [`Schema`](super::Schema). Descriptors of nested section types are
//! shared through `Arc`.

use std::collections::HashSet;
use std::sync::Arc;

use super::{SchemaError, ValueType};
use crate::tree::{ConfigOption, DEFAULT_SECTION, NodeValue, Root};

/// Description of a field mapped to a single option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    pub(crate) field: &'static str,
    pub(crate) section: Option<String>,
    pub(crate) name: String,
    pub(crate) value_type: ValueType,
    pub(crate) optional: bool,
    pub(crate) default: Option<NodeValue>,
}

impl OptionDescriptor {
    /// The Rust field this option is bound to
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The explicitly declared section, if any
    pub fn explicit_section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// The section this option lives in when its type is mapped under
    /// `default_section`.
    pub fn resolved_section<'a>(&'a self, default_section: &'a str) -> &'a str {
        self.section.as_deref().unwrap_or(default_section)
    }

    /// The option name in the tree
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The declared default, rendered as a tree value
    pub fn default(&self) -> Option<&NodeValue> {
        self.default.as_ref()
    }
}

/// Description of a field mapped to a whole section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDescriptor {
    pub(crate) field: &'static str,
    pub(crate) name: String,
    pub(crate) optional: bool,
    pub(crate) nested: Arc<Descriptor>,
}

impl SectionDescriptor {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The section name in the tree
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The descriptor of the section's own type
    pub fn nested(&self) -> &Descriptor {
        &self.nested
    }
}

/// A single field of a mapped type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDescriptor {
    Option(OptionDescriptor),
    Section(SectionDescriptor),
}

impl FieldDescriptor {
    pub fn field(&self) -> &'static str {
        match self {
            FieldDescriptor::Option(o) => o.field,
            FieldDescriptor::Section(s) => s.field,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            FieldDescriptor::Option(o) => o.optional,
            FieldDescriptor::Section(s) => s.optional,
        }
    }
}

/// An option together with the (section, name) pair it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOption {
    pub section: String,
    pub name: String,
    /// Field path from the root type, joined with `.`
    pub field: String,
    /// The nearest enclosing section field, if any
    pub owner: Option<String>,
}

/// Every node a descriptor maps to, flattened into tree coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    options: Vec<ResolvedOption>,
    sections: Vec<String>,
}

impl Layout {
    pub fn options(&self) -> &[ResolvedOption] {
        &self.options
    }

    /// Names of the sections owned by section fields
    pub fn section_fields(&self) -> &[String] {
        &self.sections
    }

    /// Check whether `(section, name)` is mapped by some option field
    pub fn maps_option(&self, section: &str, name: &str) -> bool {
        self.options
            .iter()
            .any(|o| o.section == section && o.name == name)
    }

    /// Check whether anything in the layout lives in `section`
    pub fn maps_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
            || self.options.iter().any(|o| o.section == section)
    }

    /// Checks that every option resolves to a unique (section, name) pair and
    /// that sections owned by section fields are not targeted from outside.
    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        let mut seen_sections = HashSet::new();
        for name in &self.sections {
            if !seen_sections.insert(name.as_str()) {
                return Err(SchemaError::DuplicateSection { name: name.clone() });
            }
        }

        let mut seen_options = HashSet::new();
        for option in &self.options {
            if !seen_options.insert((option.section.as_str(), option.name.as_str())) {
                return Err(SchemaError::DuplicateOption {
                    section: option.section.clone(),
                    name: option.name.clone(),
                });
            }
            if seen_sections.contains(option.section.as_str())
                && option.owner.as_deref() != Some(option.section.as_str())
            {
                return Err(SchemaError::SectionCollision {
                    section: option.section.clone(),
                    field: option.field.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Static description of a mapped type.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub(crate) type_name: &'static str,
    pub(crate) fields: Vec<FieldDescriptor>,
}

impl Descriptor {
    /// The Rust type name of the mapped type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.fields.iter().filter_map(|f| match f {
            FieldDescriptor::Option(o) => Some(o),
            FieldDescriptor::Section(_) => None,
        })
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionDescriptor> {
        self.fields.iter().filter_map(|f| match f {
            FieldDescriptor::Section(s) => Some(s),
            FieldDescriptor::Option(_) => None,
        })
    }

    /// Check whether a required option of this type lives in `section` when
    /// the type is mapped under it.
    ///
    /// Nested section fields are not consulted; they own sections of their own.
    pub fn requires_section(&self, section: &str) -> bool {
        self.options()
            .any(|o| !o.optional && o.resolved_section(section) == section)
    }

    /// Flattens this descriptor into tree coordinates, as if it were the root type.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::default();
        self.collect_layout(DEFAULT_SECTION, None, "", &mut layout);
        layout
    }

    fn collect_layout(
        &self,
        default_section: &str,
        owner: Option<&str>,
        prefix: &str,
        layout: &mut Layout,
    ) {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.field().to_string()
            } else {
                format!("{prefix}.{}", field.field())
            };
            match field {
                FieldDescriptor::Option(o) => layout.options.push(ResolvedOption {
                    section: o.resolved_section(default_section).to_string(),
                    name: o.name.clone(),
                    field: path,
                    owner: owner.map(str::to_string),
                }),
                FieldDescriptor::Section(s) => {
                    layout.sections.push(s.name.clone());
                    s.nested
                        .collect_layout(&s.name, Some(&s.name), &path, layout);
                }
            }
        }
    }

    /// Builds a tree holding the declared default of every optional option.
    ///
    /// Options without a default are left out and empty sections are dropped,
    /// so a type without defaults produces an empty root.
    pub fn defaults(&self) -> Root {
        let mut root = Root::empty();
        self.collect_defaults(DEFAULT_SECTION, &mut root);
        root.prune_empty();
        root
    }

    fn collect_defaults(&self, default_section: &str, root: &mut Root) {
        for field in &self.fields {
            match field {
                FieldDescriptor::Option(o) => {
                    if let (true, Some(default)) = (o.optional, &o.default) {
                        root.insert_option(
                            o.resolved_section(default_section),
                            ConfigOption::new(o.name.clone(), default.clone()),
                        );
                    }
                }
                FieldDescriptor::Section(s) => s.nested.collect_defaults(&s.name, root),
            }
        }
    }
}
