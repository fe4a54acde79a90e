//! Value types supported by option fields.
//!
//! The configuration tree only stores text. Every Rust type that can back an
//! option field implements [`FieldValue`], which knows how to coerce a
//! [`NodeValue`] into the type and how to render the type back into a node.
//!
//! Supported types:
//!
//! | Kind     | Rust types                                             |
//! |----------|--------------------------------------------------------|
//! | text     | `String`                                               |
//! | integer  | `i8` `i16` `i32` `i64` `isize` `u8` `u16` `u32` `u64` `usize` |
//! | boolean  | `bool`                                                 |
//! | float    | `f32` `f64`                                            |
//! | list     | `Vec<S>` for any of the scalar types above             |
//!
//! Anything else does not implement [`FieldValue`], so a schema that tries to
//! register it does not compile.

use std::fmt;

use crate::tree::NodeValue;

/// The scalar kinds an option can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Text,
    Integer,
    Boolean,
    Float,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Text => "text",
            ScalarType::Integer => "integer",
            ScalarType::Boolean => "boolean",
            ScalarType::Float => "float",
        };
        f.write_str(name)
    }
}

/// The declared type of an option field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Scalar(ScalarType),
    List(ScalarType),
}

impl ValueType {
    pub fn is_list(&self) -> bool {
        matches!(self, ValueType::List(_))
    }

    /// The element type, for lists, or the type itself, for scalars.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ValueType::Scalar(t) | ValueType::List(t) => *t,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Scalar(t) => write!(f, "{t}"),
            ValueType::List(t) => write!(f, "list of {t}"),
        }
    }
}

/// A scalar type that can be parsed from and rendered to option text.
pub trait ScalarValue: Clone + Send + Sync + 'static {
    const TYPE: ScalarType;

    /// Parses option text, returning `None` if the text is not a valid value.
    fn parse_text(raw: &str) -> Option<Self>;

    fn render(&self) -> String;

    /// The value assigned when a required option is missing in lenient mode.
    fn zero() -> Self;
}

/// A type that can back an option field.
pub trait FieldValue: Clone + Send + Sync + 'static {
    fn value_type() -> ValueType;

    /// Coerces a tree node into this type.
    fn from_node(node: &NodeValue) -> Option<Self>;

    fn to_node(&self) -> NodeValue;

    /// The value assigned when a required option is missing in lenient mode.
    fn zero() -> Self;
}

impl ScalarValue for String {
    const TYPE: ScalarType = ScalarType::Text;

    fn parse_text(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn zero() -> Self {
        String::new()
    }
}

impl ScalarValue for bool {
    const TYPE: ScalarType = ScalarType::Boolean;

    fn parse_text(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn zero() -> Self {
        false
    }
}

macro_rules! numeric_scalar {
    ($kind:expr, $zero:expr; $($t:ty),+ $(,)?) => {
        $(
            impl ScalarValue for $t {
                const TYPE: ScalarType = $kind;

                fn parse_text(raw: &str) -> Option<Self> {
                    raw.trim().parse::<$t>().ok()
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn zero() -> Self {
                    $zero
                }
            }
        )+
    };
}

numeric_scalar!(ScalarType::Integer, 0; i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
numeric_scalar!(ScalarType::Float, 0.0; f32, f64);

macro_rules! scalar_field {
    ($($t:ty),+ $(,)?) => {
        $(
            impl FieldValue for $t {
                fn value_type() -> ValueType {
                    ValueType::Scalar(<$t as ScalarValue>::TYPE)
                }

                fn from_node(node: &NodeValue) -> Option<Self> {
                    match node {
                        NodeValue::Scalar(raw) => <$t as ScalarValue>::parse_text(raw),
                        NodeValue::List(_) => None,
                    }
                }

                fn to_node(&self) -> NodeValue {
                    NodeValue::Scalar(ScalarValue::render(self))
                }

                fn zero() -> Self {
                    <$t as ScalarValue>::zero()
                }
            }
        )+
    };
}

scalar_field!(String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<S: ScalarValue> FieldValue for Vec<S> {
    fn value_type() -> ValueType {
        ValueType::List(S::TYPE)
    }

    /// Lists accept a scalar node as a single item; an empty scalar is an
    /// empty list.
    fn from_node(node: &NodeValue) -> Option<Self> {
        match node {
            NodeValue::List(items) => items.iter().map(|item| S::parse_text(item)).collect(),
            NodeValue::Scalar(raw) if raw.is_empty() => Some(Vec::new()),
            NodeValue::Scalar(raw) => S::parse_text(raw).map(|item| vec![item]),
        }
    }

    fn to_node(&self) -> NodeValue {
        NodeValue::List(self.iter().map(ScalarValue::render).collect())
    }

    fn zero() -> Self {
        Vec::new()
    }
}
