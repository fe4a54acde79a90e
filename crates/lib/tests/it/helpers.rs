//! Mapped fixture types and tree builders shared by the integration tests.

use confmap::{
    ConfigMapper, ConfigOption, Mapped, Root, SchemaBuilder, Section,
    tree::NodeValue,
};

// ==========================
// FIXTURE TYPES
// ==========================

/// Two required options in an explicit section.
///
/// `option_string` is nullable so tests can leave a required option absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BasicMapped {
    pub option_string: Option<String>,
    pub option_int: i32,
}

impl Mapped for BasicMapped {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .nullable_option("optionString", |o| &o.option_string, |o| &mut o.option_string)
            .section("section1");
        schema
            .option("optionInt", |o| &o.option_int, |o| &mut o.option_int)
            .section("section1");
    }
}

/// The section type of [`StructuredMapped`], with one renamed option.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StructuredSection {
    pub option_string: String,
    pub option_int: i32,
}

impl Mapped for StructuredSection {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .option("optionString", |s| &s.option_string, |s| &mut s.option_string)
            .name("optionStringFoo");
        schema.option("optionInt", |s| &s.option_int, |s| &mut s.option_int);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct StructuredMapped {
    pub section1: Option<StructuredSection>,
}

impl Mapped for StructuredMapped {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.nullable_section("section1", |o| &o.section1, |o| &mut o.section1);
    }
}

/// A single optional option.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OptionalOptionMapped {
    pub option: Option<i32>,
}

impl Mapped for OptionalOptionMapped {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .nullable_option("option", |o| &o.option, |o| &mut o.option)
            .section("section")
            .optional();
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OptionalSectionInner {
    pub option: i32,
}

impl Mapped for OptionalSectionInner {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("option", |s| &s.option, |s| &mut s.option);
    }
}

/// A single optional section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OptionalSectionMapped {
    pub section: Option<OptionalSectionInner>,
}

impl Mapped for OptionalSectionMapped {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .nullable_section("section", |o| &o.section, |o| &mut o.section)
            .optional();
    }
}

/// Database settings nested inside [`AppConfig`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: Option<u32>,
    pub timeout_secs: Option<f64>,
}

impl Mapped for DatabaseConfig {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("url", |d| &d.url, |d| &mut d.url);
        schema
            .nullable_option("pool_size", |d| &d.pool_size, |d| &mut d.pool_size)
            .name("pool-size")
            .optional()
            .default_value(8);
        schema
            .nullable_option("timeout_secs", |d| &d.timeout_secs, |d| &mut d.timeout_secs)
            .name("timeout")
            .optional();
    }
}

/// Every supported value kind, defaults, renames and nested sections.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    pub name: String,
    pub debug: bool,
    pub ratio: f32,
    pub retries: Option<u8>,
    pub features: Vec<String>,
    pub ports: Option<Vec<u16>>,
    pub database: DatabaseConfig,
    pub replica: Option<DatabaseConfig>,
}

impl Mapped for AppConfig {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("name", |a| &a.name, |a| &mut a.name);
        schema.option("debug", |a| &a.debug, |a| &mut a.debug);
        schema
            .option("ratio", |a| &a.ratio, |a| &mut a.ratio)
            .section("tuning");
        schema
            .nullable_option("retries", |a| &a.retries, |a| &mut a.retries)
            .section("tuning")
            .optional()
            .default_value(3);
        schema
            .option("features", |a| &a.features, |a| &mut a.features)
            .optional();
        schema
            .nullable_option("ports", |a| &a.ports, |a| &mut a.ports)
            .section("network")
            .name("listen-ports")
            .optional()
            .default_value(vec![80, 443]);
        schema.section("database", |a| &a.database, |a| &mut a.database);
        schema
            .nullable_section("replica", |a| &a.replica, |a| &mut a.replica)
            .name("database-replica")
            .optional();
    }
}

/// Innermost level of [`LayeredConfig`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PoolSettings {
    pub size: u32,
}

impl Mapped for PoolSettings {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.option("size", |p| &p.size, |p| &mut p.size);
    }
}

/// A required section holding nothing but another section, so its own
/// section is never written.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StorageSettings {
    pub pool: PoolSettings,
}

impl Mapped for StorageSettings {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.section("pool", |s| &s.pool, |s| &mut s.pool);
    }
}

/// Settings whose options are all optional and carry no default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheSettings {
    pub ttl: Option<u64>,
    pub eviction: Option<String>,
}

impl Mapped for CacheSettings {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema
            .nullable_option("ttl", |c| &c.ttl, |c| &mut c.ttl)
            .optional();
        schema
            .nullable_option("eviction", |c| &c.eviction, |c| &mut c.eviction)
            .section("policies")
            .optional();
    }
}

/// Required sections whose own section may be empty after saving.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayeredConfig {
    pub storage: StorageSettings,
    pub cache: CacheSettings,
}

impl Mapped for LayeredConfig {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema.default_constructor();
        schema.section("storage", |l| &l.storage, |l| &mut l.storage);
        schema.section("cache", |l| &l.cache, |l| &mut l.cache);
    }
}

// ==========================
// FIXTURE VALUES
// ==========================

pub fn basic_object() -> BasicMapped {
    BasicMapped {
        option_string: Some("foo".to_string()),
        option_int: 10,
    }
}

pub fn basic_tree() -> Root {
    Root::new(
        "",
        vec![Section::new(
            "section1",
            vec![
                ConfigOption::scalar("optionString", "foo"),
                ConfigOption::scalar("optionInt", "10"),
            ],
        )],
    )
}

pub fn app_object() -> AppConfig {
    AppConfig {
        name: "inventory".to_string(),
        debug: true,
        ratio: 0.75,
        retries: Some(5),
        features: vec!["search".to_string(), "export, csv".to_string()],
        ports: Some(vec![8080, 8443]),
        database: DatabaseConfig {
            url: "postgres://localhost/inventory".to_string(),
            pool_size: Some(16),
            timeout_secs: Some(2.5),
        },
        replica: Some(DatabaseConfig {
            url: "postgres://replica/inventory".to_string(),
            pool_size: None,
            timeout_secs: None,
        }),
    }
}

/// The smallest tree [`AppConfig`] loads from in strict mode.
pub fn minimal_app_tree() -> Root {
    Root::new(
        "",
        vec![
            Section::new(
                "",
                vec![
                    ConfigOption::scalar("name", "inventory"),
                    ConfigOption::scalar("debug", "no"),
                ],
            ),
            Section::new("tuning", vec![ConfigOption::scalar("ratio", "1.5")]),
            Section::new(
                "database",
                vec![ConfigOption::scalar("url", "sqlite::memory:")],
            ),
        ],
    )
}

// ==========================
// HELPERS
// ==========================

pub fn mapper<T: Mapped>() -> ConfigMapper<T> {
    ConfigMapper::new().expect("Fixture schema should build")
}

/// Shorthand for a scalar node
pub fn scalar(text: &str) -> NodeValue {
    NodeValue::Scalar(text.to_string())
}

/// Shorthand for a list node
pub fn list(items: &[&str]) -> NodeValue {
    NodeValue::List(items.iter().map(|item| item.to_string()).collect())
}
