//! Loading in lenient mode

use confmap::{ConfigOption, LoadingMode, Root};

use crate::helpers::*;

#[test]
fn test_lenient_missing_option_degrades_to_zero() {
    let mut tree = basic_tree();
    tree.section_mut("section1").unwrap().remove("optionInt");

    let object = mapper::<BasicMapped>()
        .load(&tree, LoadingMode::Lenient)
        .unwrap();
    assert_eq!(object.option_int, 0);
    assert_eq!(object.option_string.as_deref(), Some("foo"));
}

#[test]
fn test_lenient_missing_nullable_option_is_absent() {
    let mut tree = basic_tree();
    tree.section_mut("section1").unwrap().remove("optionString");

    let object = mapper::<BasicMapped>()
        .load(&tree, LoadingMode::Lenient)
        .unwrap();
    assert_eq!(object.option_string, None);
    assert_eq!(object.option_int, 10);
}

#[test]
fn test_lenient_empty_tree_yields_zero_object() {
    let object = mapper::<BasicMapped>()
        .load(&Root::empty(), LoadingMode::Lenient)
        .unwrap();
    assert_eq!(object, BasicMapped::default());
}

#[test]
fn test_lenient_missing_section_is_instantiated() {
    let object = mapper::<StructuredMapped>()
        .load(&Root::empty(), LoadingMode::Lenient)
        .unwrap();
    assert_eq!(object.section1, Some(StructuredSection::default()));
}

#[test]
fn test_lenient_missing_section_still_applies_defaults() {
    let mut tree = minimal_app_tree();
    tree.remove_section("database");

    let config = mapper::<AppConfig>()
        .load(&tree, LoadingMode::Lenient)
        .unwrap();
    assert_eq!(config.database.url, "");
    assert_eq!(config.database.pool_size, Some(8));
    assert_eq!(config.replica, None, "Optional sections stay absent");
}

#[test]
fn test_lenient_does_not_forgive_malformed_values() {
    let mut tree = basic_tree();
    tree.insert_option("section1", ConfigOption::scalar("optionInt", "ten"));

    let err = mapper::<BasicMapped>()
        .load(&tree, LoadingMode::Lenient)
        .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_lenient_and_strict_agree_on_complete_trees() {
    let mapper = mapper::<AppConfig>();
    let tree = mapper.save(&app_object()).unwrap();

    let strict = mapper.load(&tree, LoadingMode::Strict).unwrap();
    let lenient = mapper.load(&tree, LoadingMode::Lenient).unwrap();
    assert_eq!(strict, lenient);
}

#[test]
fn test_default_mode_is_strict() {
    assert_eq!(LoadingMode::default(), LoadingMode::Strict);
}
