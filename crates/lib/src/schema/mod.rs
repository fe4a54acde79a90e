//! Schema descriptors for mapped types.
//!
//! A mapped type implements [`Mapped`] and registers its fields on a
//! [`SchemaBuilder`]. The resulting [`Schema`] is built once per type, validated,
//! and cached for the lifetime of the process.
//!
//! # Resolution rules
//!
//! - An option lives in its explicit section, or else in the enclosing default
//!   section: [`DEFAULT_SECTION`](crate::tree::DEFAULT_SECTION) for the root
//!   type, and the section field's name for a nested type.
//! - An option is named after its field unless renamed.
//! - A section field is named after its field unless renamed. Its type's
//!   options are resolved against that name. Section fields nested inside a
//!   section type map to top-level sections of their own name.
//!
//! # Validation
//!
//! Building fails with a [`SchemaError`] when two options resolve to the same
//! (section, name) pair, when two section fields share a name, when an option
//! outside a section field targets that field's section, when a section type
//! contains itself, when a required field declares a default, or when a name
//! resolves to the empty string.
//!
//! # Example
//!
//! ```
//! use confmap::schema::{Mapped, Schema, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Basic {
//!     option_string: Option<String>,
//!     option_int: i64,
//! }
//!
//! impl Mapped for Basic {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema.default_constructor();
//!         schema
//!             .nullable_option("optionString", |o| &o.option_string, |o| &mut o.option_string)
//!             .section("section1");
//!         schema
//!             .option("optionInt", |o| &o.option_int, |o| &mut o.option_int)
//!             .section("section1");
//!     }
//! }
//!
//! let schema = Schema::<Basic>::get().unwrap();
//! assert_eq!(schema.descriptor().options().count(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

pub mod descriptor;
pub mod errors;
pub mod field;
mod registry;
pub mod value;

pub use descriptor::{
    Descriptor, FieldDescriptor, Layout, OptionDescriptor, ResolvedOption, SectionDescriptor,
};
pub use errors::SchemaError;
pub use field::{OptionBuilder, SectionBuilder};
pub use value::{FieldValue, ScalarType, ScalarValue, ValueType};

use field::{Access, FieldDraft, OptionSlot, PendingSection, SectionSlot};

/// A type that can be mapped to and from a configuration tree.
pub trait Mapped: Sized + 'static {
    /// Registers the fields of this type.
    ///
    /// Called once per type, the first time its schema is requested.
    fn describe(schema: &mut SchemaBuilder<Self>);
}

/// The typed accessor behind a field descriptor.
pub(crate) enum Binding<T> {
    Option(Box<dyn OptionSlot<T>>),
    Section(Box<dyn SectionSlot<T>>),
}

enum PendingKind<T> {
    Option(Box<dyn OptionSlot<T>>, ValueType),
    Section(PendingSection<T>),
}

struct PendingField<T> {
    draft: FieldDraft,
    kind: PendingKind<T>,
}

/// Collects the fields of a mapped type.
///
/// Handed to [`Mapped::describe`]. Fields keep their registration order, which
/// is also the order options and sections are written in.
pub struct SchemaBuilder<T> {
    fields: Vec<PendingField<T>>,
    constructor: Option<fn() -> T>,
}

impl<T: Mapped> SchemaBuilder<T> {
    fn new() -> Self {
        Self {
            fields: Vec::new(),
            constructor: None,
        }
    }

    /// Sets the function used to create a zero-valued instance when loading.
    ///
    /// Types without a constructor can still be saved, but loading them fails
    /// with [`MappingError::Instantiation`](crate::mapper::MappingError::Instantiation).
    pub fn constructor(&mut self, constructor: fn() -> T) -> &mut Self {
        self.constructor = Some(constructor);
        self
    }

    /// Registers an option stored as a plain `V`.
    pub fn option<V: FieldValue>(
        &mut self,
        field: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> OptionBuilder<'_, V> {
        let slot = field::option_slot(Access::Plain { get, get_mut });
        let draft = self.push(field, PendingKind::Option(slot, V::value_type()));
        OptionBuilder::new(draft)
    }

    /// Registers an option stored as `Option<V>`, where `None` means absent.
    pub fn nullable_option<V: FieldValue>(
        &mut self,
        field: &'static str,
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    ) -> OptionBuilder<'_, V> {
        let slot = field::option_slot(Access::Nullable { get, get_mut });
        let draft = self.push(field, PendingKind::Option(slot, V::value_type()));
        OptionBuilder::new(draft)
    }

    /// Registers a section stored as a plain `U`.
    pub fn section<U: Mapped>(
        &mut self,
        field: &'static str,
        get: fn(&T) -> &U,
        get_mut: fn(&mut T) -> &mut U,
    ) -> SectionBuilder<'_> {
        let pending = field::pending_section(Access::Plain { get, get_mut });
        SectionBuilder::new(self.push(field, PendingKind::Section(pending)))
    }

    /// Registers a section stored as `Option<U>`, where `None` means absent.
    pub fn nullable_section<U: Mapped>(
        &mut self,
        field: &'static str,
        get: fn(&T) -> &Option<U>,
        get_mut: fn(&mut T) -> &mut Option<U>,
    ) -> SectionBuilder<'_> {
        let pending = field::pending_section(Access::Nullable { get, get_mut });
        SectionBuilder::new(self.push(field, PendingKind::Section(pending)))
    }

    fn push(&mut self, field: &'static str, kind: PendingKind<T>) -> &mut FieldDraft {
        let index = self.fields.len();
        self.fields.push(PendingField {
            draft: FieldDraft::new(field),
            kind,
        });
        &mut self.fields[index].draft
    }

    fn build(self) -> Result<Schema<T>, SchemaError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut bindings = Vec::with_capacity(self.fields.len());

        for PendingField { draft, kind } in self.fields {
            let name = draft.name.unwrap_or_else(|| draft.field.to_string());
            if name.is_empty() {
                return Err(SchemaError::InvalidName {
                    field: draft.field.to_string(),
                });
            }
            match kind {
                PendingKind::Option(slot, value_type) => {
                    if draft.default.is_some() && !draft.optional {
                        return Err(SchemaError::DefaultOnRequired {
                            field: draft.field.to_string(),
                        });
                    }
                    fields.push(FieldDescriptor::Option(OptionDescriptor {
                        field: draft.field,
                        section: draft.section,
                        name,
                        value_type,
                        optional: draft.optional,
                        default: draft.default,
                    }));
                    bindings.push(Binding::Option(slot));
                }
                PendingKind::Section(resolve) => {
                    let (slot, nested) = resolve()?;
                    fields.push(FieldDescriptor::Section(SectionDescriptor {
                        field: draft.field,
                        name,
                        optional: draft.optional,
                        nested,
                    }));
                    bindings.push(Binding::Section(slot));
                }
            }
        }

        let descriptor = Arc::new(Descriptor {
            type_name: std::any::type_name::<T>(),
            fields,
        });
        let layout = descriptor.layout();
        layout.validate()?;

        Ok(Schema {
            descriptor,
            layout,
            bindings,
            constructor: self.constructor,
        })
    }
}

impl<T: Mapped + Default> SchemaBuilder<T> {
    /// Uses [`Default::default`] as the constructor.
    pub fn default_constructor(&mut self) -> &mut Self {
        self.constructor(T::default)
    }
}

/// The validated schema of a mapped type.
///
/// Immutable once built and shared through `Arc`, so it can be used from many
/// threads at once.
pub struct Schema<T> {
    descriptor: Arc<Descriptor>,
    layout: Layout,
    bindings: Vec<Binding<T>>,
    constructor: Option<fn() -> T>,
}

impl<T: Mapped> Schema<T> {
    /// Returns the cached schema of `T`, building it on first use.
    pub fn get() -> Result<Arc<Self>, SchemaError> {
        registry::get_or_build::<T>()
    }

    /// Builds the schema of `T` without consulting or filling the cache.
    pub fn build() -> Result<Self, SchemaError> {
        let mut builder = SchemaBuilder::new();
        T::describe(&mut builder);
        builder.build()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub(crate) fn descriptor_arc(&self) -> Arc<Descriptor> {
        Arc::clone(&self.descriptor)
    }

    /// The flattened tree coordinates of every mapped node
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Check whether a constructor was registered
    pub fn can_instantiate(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<fn() -> T> {
        self.constructor
    }

    /// Field descriptors paired with their typed accessors, in declaration order.
    pub(crate) fn bindings(&self) -> impl Iterator<Item = (&FieldDescriptor, &Binding<T>)> {
        self.descriptor.fields.iter().zip(&self.bindings)
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("descriptor", &self.descriptor)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}
