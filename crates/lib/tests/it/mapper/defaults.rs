//! Default-value projection

use confmap::{ConfigOption, Root, Section};

use crate::helpers::*;

#[test]
fn test_save_defaults_emits_declared_defaults() {
    let defaults = mapper::<AppConfig>().save_defaults();

    let expected = Root::new(
        "",
        vec![
            Section::new("tuning", vec![ConfigOption::scalar("retries", "3")]),
            Section::new("network", vec![ConfigOption::list("listen-ports", ["80", "443"])]),
            Section::new("database", vec![ConfigOption::scalar("pool-size", "8")]),
            Section::new(
                "database-replica",
                vec![ConfigOption::scalar("pool-size", "8")],
            ),
        ],
    );
    assert_eq!(defaults, expected);
}

#[test]
fn test_save_defaults_without_defaults_is_empty() {
    assert!(mapper::<BasicMapped>().save_defaults().is_empty());
    assert!(mapper::<OptionalOptionMapped>().save_defaults().is_empty());
    assert!(mapper::<OptionalSectionMapped>().save_defaults().is_empty());
}

#[test]
fn test_defaults_load_back_leniently() {
    let mapper = mapper::<AppConfig>();
    let config = mapper
        .load(&mapper.save_defaults(), confmap::LoadingMode::Lenient)
        .unwrap();

    assert_eq!(config.retries, Some(3));
    assert_eq!(config.ports, Some(vec![80, 443]));
    assert_eq!(config.database.pool_size, Some(8));
    // The replica section is present in the defaults tree, so it is loaded
    assert_eq!(
        config.replica.as_ref().and_then(|r| r.pool_size),
        Some(8)
    );
}

#[test]
fn test_descriptor_defaults_match_mapper() {
    let mapper = mapper::<AppConfig>();
    assert_eq!(mapper.descriptor().defaults(), mapper.save_defaults());
}
