//! Schema construction and validation tests

use std::sync::Arc;

use confmap::{
    ConfigMapper, Error, Mapped, Schema, SchemaBuilder, SchemaError,
    schema::{FieldDescriptor, ScalarType, ValueType},
};

use crate::helpers::*;

#[test]
fn test_descriptor_reflects_registration() {
    let schema = Schema::<AppConfig>::get().unwrap();
    let descriptor = schema.descriptor();

    assert!(descriptor.type_name().ends_with("AppConfig"));
    assert_eq!(descriptor.fields().len(), 8);
    assert_eq!(descriptor.options().count(), 6);
    assert_eq!(descriptor.sections().count(), 2);

    let ports = descriptor
        .options()
        .find(|o| o.field() == "ports")
        .expect("ports should be registered");
    assert_eq!(ports.name(), "listen-ports");
    assert_eq!(ports.explicit_section(), Some("network"));
    assert_eq!(ports.value_type(), ValueType::List(ScalarType::Integer));
    assert!(ports.is_optional());
    assert_eq!(ports.default(), Some(&list(&["80", "443"])));

    let name = descriptor.options().find(|o| o.field() == "name").unwrap();
    assert_eq!(name.explicit_section(), None);
    assert_eq!(name.resolved_section(""), "");
    assert!(!name.is_optional());
}

#[test]
fn test_section_fields_resolve_nested_options() {
    let schema = Schema::<AppConfig>::get().unwrap();
    let replica = schema
        .descriptor()
        .sections()
        .find(|s| s.field() == "replica")
        .unwrap();
    assert_eq!(replica.name(), "database-replica");
    assert!(replica.is_optional());
    assert_eq!(replica.nested().options().count(), 3);

    let layout = schema.layout();
    assert!(layout.maps_option("database-replica", "pool-size"));
    assert!(layout.maps_option("database", "url"));
    assert!(layout.maps_option("", "debug"));
    assert!(!layout.maps_option("database", "debug"));
    assert!(layout.maps_section("tuning"));
    assert!(!layout.maps_section("plugins"));

    let timeout = layout
        .options()
        .iter()
        .find(|o| o.section == "database-replica" && o.name == "timeout")
        .unwrap();
    assert_eq!(timeout.field, "replica.timeout_secs");
    assert_eq!(timeout.owner.as_deref(), Some("database-replica"));
}

#[test]
fn test_schema_is_cached_per_type() {
    let first = Schema::<BasicMapped>::get().unwrap();
    let second = Schema::<BasicMapped>::get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let mapper = ConfigMapper::<BasicMapped>::new().unwrap();
    assert!(std::ptr::eq(mapper.schema(), &*first));
}

#[test]
fn test_schema_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Schema::<StructuredMapped>::get().unwrap()))
        .collect();
    let schemas: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for schema in &schemas[1..] {
        assert!(Arc::ptr_eq(&schemas[0], schema));
    }
}

#[derive(Default)]
struct DuplicateOption {
    a: String,
    b: String,
}

impl Mapped for DuplicateOption {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("a", |o| &o.a, |o| &mut o.a).section("s").name("same");
        schema.option("b", |o| &o.b, |o| &mut o.b).section("s").name("same");
    }
}

#[test]
fn test_duplicate_option_is_rejected() {
    let err = Schema::<DuplicateOption>::get().unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateOption {
            section: "s".to_string(),
            name: "same".to_string(),
        }
    );
}

#[derive(Default)]
struct DuplicateSection {
    first: OptionalSectionInner,
    second: OptionalSectionInner,
}

impl Mapped for DuplicateSection {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .section("first", |o| &o.first, |o| &mut o.first)
            .name("shared");
        schema
            .section("second", |o| &o.second, |o| &mut o.second)
            .name("shared");
    }
}

#[test]
fn test_duplicate_section_is_rejected() {
    let err = Schema::<DuplicateSection>::get().unwrap_err();
    assert_eq!(
        err,
        SchemaError::DuplicateSection {
            name: "shared".to_string()
        }
    );
}

#[derive(Default)]
struct CollidingSection {
    inner: OptionalSectionInner,
    stray: i32,
}

impl Mapped for CollidingSection {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.section("inner", |o| &o.inner, |o| &mut o.inner);
        schema
            .option("stray", |o| &o.stray, |o| &mut o.stray)
            .section("inner");
    }
}

#[test]
fn test_option_targeting_owned_section_is_rejected() {
    let err = Schema::<CollidingSection>::get().unwrap_err();
    assert!(err.is_collision(), "Expected a collision, got {err:?}");
    assert_eq!(err.field(), Some("stray"));
}

#[derive(Default)]
struct SelfContaining {
    child: Option<Box<SelfContaining>>,
    value: i32,
}

impl Mapped for SelfContaining {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("value", |o| &o.value, |o| &mut o.value);
        schema.nullable_section("child", |o| &o.child, |o| &mut o.child);
    }
}

impl Mapped for Box<SelfContaining> {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.constructor(|| Box::new(SelfContaining::default()));
        schema.option("value", |o| &o.value, |o| &mut o.value);
        schema.nullable_section("child", |o| &o.child, |o| &mut o.child);
    }
}

#[test]
fn test_cyclic_section_is_rejected() {
    let err = Schema::<SelfContaining>::get().unwrap_err();
    assert!(err.is_cycle(), "Expected a cycle, got {err:?}");

    // The failed build must not poison later builds on this thread
    assert!(Schema::<BasicMapped>::get().is_ok());
}

#[derive(Default)]
struct RequiredWithDefault {
    value: i32,
}

impl Mapped for RequiredWithDefault {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .option("value", |o| &o.value, |o| &mut o.value)
            .default_value(1);
    }
}

#[test]
fn test_default_on_required_is_rejected() {
    let err = Schema::<RequiredWithDefault>::get().unwrap_err();
    assert_eq!(
        err,
        SchemaError::DefaultOnRequired {
            field: "value".to_string()
        }
    );
}

#[derive(Default)]
struct EmptyName {
    value: i32,
}

impl Mapped for EmptyName {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("value", |o| &o.value, |o| &mut o.value).name("");
    }
}

#[test]
fn test_empty_name_is_rejected() {
    let err = Schema::<EmptyName>::get().unwrap_err();
    assert!(matches!(err, SchemaError::InvalidName { .. }));
}

#[test]
fn test_schema_errors_convert_to_crate_error() {
    let err: Error = ConfigMapper::<DuplicateOption>::new().unwrap_err().into();
    assert!(err.is_schema_error());
    assert_eq!(err.module(), "schema");
}

#[test]
fn test_field_descriptor_kinds() {
    let schema = Schema::<OptionalSectionMapped>::get().unwrap();
    match &schema.descriptor().fields()[0] {
        FieldDescriptor::Section(section) => {
            assert_eq!(section.name(), "section");
            assert!(section.is_optional());
        }
        other => panic!("Expected a section field, got {other:?}"),
    }
}
