//! Typed field bindings and the builders that declare them.
//!
//! Fields are registered on a [`SchemaBuilder`](super::SchemaBuilder) with a
//! pair of accessor functions. The builder methods return an
//! [`OptionBuilder`] or [`SectionBuilder`] for the mapping metadata:
//!
//! ```
//! use confmap::schema::{Mapped, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: Option<u16>,
//! }
//!
//! impl Mapped for Server {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema.default_constructor();
//!         schema
//!             .option("host", |s| &s.host, |s| &mut s.host)
//!             .section("server");
//!         schema
//!             .nullable_option("port", |s| &s.port, |s| &mut s.port)
//!             .section("server")
//!             .optional()
//!             .default_value(8080);
//!     }
//! }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use super::{Descriptor, FieldValue, Mapped, Schema, SchemaError};
use crate::mapper::{self, LoadingMode, MappingError};
use crate::tree::{NodeValue, Root};

/// How a field is stored on its owning struct.
pub(crate) enum Access<T, V> {
    /// `V`, always present
    Plain {
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    },
    /// `Option<V>`, absent when `None`
    Nullable {
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    },
}

impl<T, V> Access<T, V> {
    fn read<'a>(&self, target: &'a T) -> Option<&'a V> {
        match self {
            Access::Plain { get, .. } => Some(get(target)),
            Access::Nullable { get, .. } => get(target).as_ref(),
        }
    }

    fn write(&self, target: &mut T, value: V) {
        match self {
            Access::Plain { get_mut, .. } => *get_mut(target) = value,
            Access::Nullable { get_mut, .. } => *get_mut(target) = Some(value),
        }
    }
}

/// Type-erased access to an option field.
pub(crate) trait OptionSlot<T>: Send + Sync {
    /// Renders the current value, or `None` if the field is absent.
    fn read(&self, source: &T) -> Option<NodeValue>;

    /// Coerces `node` and stores it. Returns `false` if coercion fails.
    fn write(&self, target: &mut T, node: &NodeValue) -> bool;

    /// Stores the zero value: the type's zero for plain fields, `None` for
    /// nullable ones.
    fn reset(&self, target: &mut T);
}

struct OptionBinding<T, V> {
    access: Access<T, V>,
}

impl<T: 'static, V: FieldValue> OptionSlot<T> for OptionBinding<T, V> {
    fn read(&self, source: &T) -> Option<NodeValue> {
        self.access.read(source).map(FieldValue::to_node)
    }

    fn write(&self, target: &mut T, node: &NodeValue) -> bool {
        match V::from_node(node) {
            Some(value) => {
                self.access.write(target, value);
                true
            }
            None => false,
        }
    }

    fn reset(&self, target: &mut T) {
        match &self.access {
            Access::Plain { get_mut, .. } => *get_mut(target) = V::zero(),
            Access::Nullable { get_mut, .. } => *get_mut(target) = None,
        }
    }
}

/// Type-erased access to a section field.
pub(crate) trait SectionSlot<T>: Send + Sync {
    /// Builds the nested object from `root`, using `section` as its default
    /// section, and stores it on `target`.
    fn load(
        &self,
        target: &mut T,
        root: &Root,
        section: &str,
        mode: LoadingMode,
    ) -> Result<(), MappingError>;

    /// Saves the nested object into `root`. Returns `false` if it is absent.
    fn save(&self, source: &T, root: &mut Root, section: &str) -> Result<bool, MappingError>;
}

struct SectionBinding<T, U> {
    access: Access<T, U>,
    schema: Arc<Schema<U>>,
}

impl<T: 'static, U: Mapped> SectionSlot<T> for SectionBinding<T, U> {
    fn load(
        &self,
        target: &mut T,
        root: &Root,
        section: &str,
        mode: LoadingMode,
    ) -> Result<(), MappingError> {
        let mut nested = mapper::instantiate(&self.schema)?;
        mapper::load_fields(&self.schema, &mut nested, root, section, mode)?;
        self.access.write(target, nested);
        Ok(())
    }

    fn save(&self, source: &T, root: &mut Root, section: &str) -> Result<bool, MappingError> {
        match self.access.read(source) {
            Some(nested) => {
                mapper::save_fields(&self.schema, nested, root, section)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub(crate) type ResolvedSection<T> = (Box<dyn SectionSlot<T>>, Arc<Descriptor>);

/// Defers building the nested schema until the owning schema is built.
pub(crate) type PendingSection<T> = Box<dyn FnOnce() -> Result<ResolvedSection<T>, SchemaError>>;

pub(crate) fn option_slot<T: 'static, V: FieldValue>(access: Access<T, V>) -> Box<dyn OptionSlot<T>> {
    Box::new(OptionBinding { access })
}

pub(crate) fn pending_section<T: 'static, U: Mapped>(access: Access<T, U>) -> PendingSection<T> {
    Box::new(move || {
        let schema = Schema::<U>::get()?;
        let descriptor = schema.descriptor_arc();
        let slot: Box<dyn SectionSlot<T>> = Box::new(SectionBinding { access, schema });
        Ok((slot, descriptor))
    })
}

/// Mapping metadata collected while a field is declared.
#[derive(Debug, Clone)]
pub(crate) struct FieldDraft {
    pub(crate) field: &'static str,
    pub(crate) section: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) optional: bool,
    pub(crate) default: Option<NodeValue>,
}

impl FieldDraft {
    pub(crate) fn new(field: &'static str) -> Self {
        Self {
            field,
            section: None,
            name: None,
            optional: false,
            default: None,
        }
    }
}

/// Sets the mapping metadata of an option field.
pub struct OptionBuilder<'a, V> {
    draft: &'a mut FieldDraft,
    _value: PhantomData<fn() -> V>,
}

impl<'a, V: FieldValue> OptionBuilder<'a, V> {
    pub(crate) fn new(draft: &'a mut FieldDraft) -> Self {
        Self {
            draft,
            _value: PhantomData,
        }
    }

    /// Places the option in `section` instead of the enclosing default section.
    pub fn section(self, section: impl Into<String>) -> Self {
        self.draft.section = Some(section.into());
        self
    }

    /// Uses `name` in the tree instead of the field identity.
    pub fn name(self, name: impl Into<String>) -> Self {
        self.draft.name = Some(name.into());
        self
    }

    /// Marks the option as optional.
    pub fn optional(self) -> Self {
        self.draft.optional = true;
        self
    }

    /// Declares the value assigned when an optional option is missing.
    ///
    /// Only valid together with [`optional`](Self::optional).
    pub fn default_value(self, value: V) -> Self {
        self.draft.default = Some(value.to_node());
        self
    }
}

/// Sets the mapping metadata of a section field.
pub struct SectionBuilder<'a> {
    draft: &'a mut FieldDraft,
}

impl<'a> SectionBuilder<'a> {
    pub(crate) fn new(draft: &'a mut FieldDraft) -> Self {
        Self { draft }
    }

    /// Uses `name` as the section name instead of the field identity.
    pub fn name(self, name: impl Into<String>) -> Self {
        self.draft.name = Some(name.into());
        self
    }

    /// Marks the section as optional.
    pub fn optional(self) -> Self {
        self.draft.optional = true;
        self
    }
}
