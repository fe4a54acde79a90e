//! INI adapter tests against realistic documents

use confmap::{
    ConfigAdapter, ConfigurationError, Error, LoadingMode, Root,
    adapter::IniAdapter,
};

use crate::helpers::*;

const APP_INI: &str = "\
; Inventory service
name = inventory
debug = yes
features = search, export\\, csv

[tuning]
ratio = 0.5
# retries falls back to its default

[network]
listen-ports = 8080, 8443

[database]
url = postgres://db:5432/inventory
pool-size: 32

[plugins]
unknown = ignored
";

fn read(text: &str) -> Result<Root, ConfigurationError> {
    IniAdapter::new().read(&mut text.as_bytes())
}

#[test]
fn test_ini_document_loads_into_mapped_type() {
    let tree = read(APP_INI).unwrap();
    let config = mapper::<AppConfig>()
        .load(&tree, LoadingMode::Strict)
        .unwrap();

    assert_eq!(config.name, "inventory");
    assert!(config.debug);
    assert_eq!(config.features, vec!["search".to_string(), "export, csv".to_string()]);
    assert_eq!(config.ratio, 0.5);
    assert_eq!(config.retries, Some(3));
    assert_eq!(config.ports, Some(vec![8080, 8443]));
    assert_eq!(config.database.url, "postgres://db:5432/inventory");
    assert_eq!(config.database.pool_size, Some(32));
}

#[test]
fn test_ini_write_is_deterministic() {
    let tree = mapper::<BasicMapped>().save(&basic_object()).unwrap();

    let mut first = Vec::new();
    IniAdapter::new().write(&tree, &mut first).unwrap();
    let mut second = Vec::new();
    IniAdapter::new().write(&tree, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "[section1]\noptionString = foo\noptionInt = 10\n"
    );
}

#[test]
fn test_ini_rewrite_preserves_tree() {
    let tree = read(APP_INI).unwrap();
    let mut bytes = Vec::new();
    IniAdapter::new().write(&tree, &mut bytes).unwrap();

    let reread = read(std::str::from_utf8(&bytes).unwrap()).unwrap();
    assert_eq!(reread, tree);
    assert_eq!(reread.get("plugins", "unknown"), Some(&scalar("ignored")));
}

#[test]
fn test_ini_errors_surface_through_crate_error() {
    let err: Error = read("[a]\nx = 1\n[a]\n").unwrap_err().into();
    assert!(err.is_configuration_error());
    assert_eq!(err.module(), "adapter");

    match err {
        Error::Configuration(ConfigurationError::DuplicateSection { line, section }) => {
            assert_eq!(line, 3);
            assert_eq!(section, "a");
        }
        other => panic!("Expected DuplicateSection, got {other:?}"),
    }
}

#[test]
fn test_ini_rejects_invalid_utf8() {
    let mut bytes: &[u8] = &[b'[', 0xff, b']'];
    let err = IniAdapter::new().read(&mut bytes).unwrap_err();
    assert!(err.is_io_error());
}
