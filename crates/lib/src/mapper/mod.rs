//! The mapping engine.
//!
//! [`ConfigMapper`] walks a type's [`Schema`] and a configuration [`Root`] in
//! lock-step. It has no state of its own beyond the shared schema: every call
//! is a pure transformation and the engine keeps no references across calls.
//!
//! # Loading
//!
//! Each option field is looked up at its resolved (section, name) pair:
//!
//! - found: the text is coerced into the declared type, or the load fails with
//!   [`MappingError::TypeMismatch`], in both modes
//! - missing and optional: the declared default is assigned, or the field is
//!   left as constructed
//! - missing and required: [`LoadingMode::Strict`] fails with
//!   [`MappingError::MissingOption`]; [`LoadingMode::Lenient`] assigns the
//!   zero value and carries on
//!
//! Section fields follow the same policy, with nested types loaded recursively.
//! A required section counts as missing only when its type has a required
//! option inside it; otherwise an absent section is loaded like an empty one.
//! Sections and options in the tree that the schema does not know about are
//! ignored.
//!
//! # Saving
//!
//! Saving always builds a fresh tree from the object. Absent optional fields
//! are left out, absent required fields fail with a missing-node error, and
//! sections that end up empty are dropped.
//!
//! ```
//! use confmap::mapper::{ConfigMapper, LoadingMode};
//! use confmap::schema::{Mapped, SchemaBuilder};
//! use confmap::tree::{ConfigOption, Root, Section};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Basic {
//!     option_string: String,
//!     option_int: i32,
//! }
//!
//! impl Mapped for Basic {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema.default_constructor();
//!         schema
//!             .option("optionString", |o| &o.option_string, |o| &mut o.option_string)
//!             .section("section1");
//!         schema
//!             .option("optionInt", |o| &o.option_int, |o| &mut o.option_int)
//!             .section("section1");
//!     }
//! }
//!
//! let mapper = ConfigMapper::<Basic>::new().unwrap();
//! let object = Basic { option_string: "foo".to_string(), option_int: 10 };
//!
//! let tree = mapper.save(&object).unwrap();
//! assert_eq!(tree, Root::new("", vec![Section::new("section1", vec![
//!     ConfigOption::scalar("optionString", "foo"),
//!     ConfigOption::scalar("optionInt", "10"),
//! ])]));
//!
//! assert_eq!(mapper.load(&tree, LoadingMode::Strict).unwrap(), object);
//! ```

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::schema::{Binding, Descriptor, FieldDescriptor, Mapped, Schema, SchemaError};
use crate::tree::{ConfigOption, DEFAULT_SECTION, Root};

pub mod errors;


pub use errors::MappingError;

/// How missing required nodes are handled while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadingMode {
    /// A missing required option or section fails the load
    #[default]
    Strict,
    /// A missing required option or section is given its zero value
    ///
    /// The result should be treated as provisional by the caller.
    Lenient,
}

/// Maps configuration trees onto `T` and back.
pub struct ConfigMapper<T> {
    schema: Arc<Schema<T>>,
}

impl<T: Mapped> ConfigMapper<T> {
    /// Creates a mapper using the cached schema of `T`.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self::with_schema(Schema::get()?))
    }

    pub fn with_schema(schema: Arc<Schema<T>>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    pub fn descriptor(&self) -> &Descriptor {
        self.schema.descriptor()
    }

    /// Creates a new `T` populated from `root`.
    pub fn load(&self, root: &Root, mode: LoadingMode) -> Result<T, MappingError> {
        debug!(
            type_name = self.descriptor().type_name(),
            ?mode,
            sections = root.len(),
            "Loading configuration"
        );
        self.log_unknown_nodes(root);

        let mut object = instantiate(&self.schema)?;
        load_fields(&self.schema, &mut object, root, DEFAULT_SECTION, mode)?;
        Ok(object)
    }

    /// Builds a fresh tree from the current values of `object`.
    pub fn save(&self, object: &T) -> Result<Root, MappingError> {
        debug!(
            type_name = self.descriptor().type_name(),
            "Saving configuration"
        );
        let mut root = Root::empty();
        save_fields(&self.schema, object, &mut root, DEFAULT_SECTION)?;
        root.prune_empty();
        Ok(root)
    }

    /// Builds a tree holding the declared defaults, without an instance of `T`.
    pub fn save_defaults(&self) -> Root {
        self.descriptor().defaults()
    }

    fn log_unknown_nodes(&self, root: &Root) {
        let layout = self.schema.layout();
        for section in root {
            if !layout.maps_section(section.name()) {
                debug!(section = section.name(), "Ignoring unknown section");
                continue;
            }
            for option in section {
                if !layout.maps_option(section.name(), option.name()) {
                    debug!(
                        section = section.name(),
                        option = option.name(),
                        "Ignoring unknown option"
                    );
                }
            }
        }
    }
}

impl<T> Clone for ConfigMapper<T> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
        }
    }
}

impl<T> std::fmt::Debug for ConfigMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigMapper")
            .field("schema", &self.schema)
            .finish()
    }
}

/// Creates a zero-valued instance with the schema's constructor.
pub(crate) fn instantiate<T: Mapped>(schema: &Schema<T>) -> Result<T, MappingError> {
    let constructor = schema
        .constructor()
        .ok_or_else(|| MappingError::Instantiation {
            type_name: schema.descriptor().type_name().to_string(),
        })?;
    Ok(constructor())
}

/// Populates the fields of `target` from `root`.
///
/// Options without an explicit section are read from `default_section`.
pub(crate) fn load_fields<T: Mapped>(
    schema: &Schema<T>,
    target: &mut T,
    root: &Root,
    default_section: &str,
    mode: LoadingMode,
) -> Result<(), MappingError> {
    for (field, binding) in schema.bindings() {
        match (field, binding) {
            (FieldDescriptor::Option(option), Binding::Option(slot)) => {
                let section = option.resolved_section(default_section);
                let name = option.name();
                match root.get(section, name) {
                    Some(node) => {
                        if !slot.write(target, node) {
                            return Err(MappingError::TypeMismatch {
                                section: section.to_string(),
                                name: name.to_string(),
                                field: option.field().to_string(),
                                expected: option.value_type().to_string(),
                                raw: node.to_string(),
                            });
                        }
                        trace!(section, option = name, "Loaded option");
                    }
                    None if option.is_optional() => {
                        if let Some(default) = option.default() {
                            if !slot.write(target, default) {
                                return Err(MappingError::TypeMismatch {
                                    section: section.to_string(),
                                    name: name.to_string(),
                                    field: option.field().to_string(),
                                    expected: option.value_type().to_string(),
                                    raw: default.to_string(),
                                });
                            }
                            trace!(section, option = name, "Applied default value");
                        }
                    }
                    None => match mode {
                        LoadingMode::Strict => {
                            return Err(MappingError::MissingOption {
                                section: section.to_string(),
                                name: name.to_string(),
                            });
                        }
                        LoadingMode::Lenient => {
                            warn!(
                                section,
                                option = name,
                                "Required option missing, using zero value"
                            );
                            slot.reset(target);
                        }
                    },
                }
            }
            (FieldDescriptor::Section(section), Binding::Section(slot)) => {
                let name = section.name();
                if root.contains_section(name) {
                    slot.load(target, root, name, mode)?;
                    trace!(section = name, "Loaded section");
                } else if section.is_optional() {
                    trace!(section = name, "Optional section absent");
                } else if !section.nested().requires_section(name) {
                    // Save prunes empty sections, which may include this one
                    slot.load(target, root, name, mode)?;
                    trace!(section = name, "Loaded section without own options");
                } else {
                    match mode {
                        LoadingMode::Strict => {
                            return Err(MappingError::MissingSection {
                                section: name.to_string(),
                            });
                        }
                        LoadingMode::Lenient => {
                            warn!(section = name, "Required section missing, using zero value");
                            slot.load(target, root, name, mode)?;
                        }
                    }
                }
            }
            _ => unreachable!("schema bindings always match their descriptors"),
        }
    }
    Ok(())
}

/// Writes the fields of `source` into `root`.
///
/// Options without an explicit section go to `default_section`. Empty sections
/// are left in place; the caller prunes them once the whole object is saved.
pub(crate) fn save_fields<T: Mapped>(
    schema: &Schema<T>,
    source: &T,
    root: &mut Root,
    default_section: &str,
) -> Result<(), MappingError> {
    for (field, binding) in schema.bindings() {
        match (field, binding) {
            (FieldDescriptor::Option(option), Binding::Option(slot)) => {
                let section = option.resolved_section(default_section);
                match slot.read(source) {
                    Some(value) => {
                        root.insert_option(section, ConfigOption::new(option.name(), value));
                    }
                    None if option.is_optional() => {
                        trace!(section, option = option.name(), "Omitting absent option");
                    }
                    None => {
                        return Err(MappingError::MissingOption {
                            section: section.to_string(),
                            name: option.name().to_string(),
                        });
                    }
                }
            }
            (FieldDescriptor::Section(section), Binding::Section(slot)) => {
                let present = slot.save(source, root, section.name())?;
                if !present && !section.is_optional() {
                    return Err(MappingError::MissingSection {
                        section: section.name().to_string(),
                    });
                }
            }
            _ => unreachable!("schema bindings always match their descriptors"),
        }
    }
    Ok(())
}
