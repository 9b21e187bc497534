//! Metadata values attached to records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// One metadata field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Metadata),
}

/// Auxiliary key/value fields of a record
///
/// Kept in insertion order so renderings list fields as they were supplied.
pub type Metadata = IndexMap<String, Value>;

/// Render fields on one line as `{key: value, ...}`, or `""` when empty
///
/// Used where a record's metadata must fit in a single cell or line.
pub fn inline_fields(fields: &Metadata) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_map(&mut out, fields);
    out
}

fn write_nested(out: &mut impl Write, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => write!(out, "{:?}", s),
        Value::List(items) => {
            out.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_nested(out, item)?;
            }
            out.write_char(']')
        }
        Value::Map(fields) => write_map(out, fields),
        scalar => write!(out, "{}", scalar),
    }
}

fn write_map(out: &mut impl Write, fields: &Metadata) -> fmt::Result {
    out.write_char('{')?;
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{}: ", key)?;
        write_nested(out, value)?;
    }
    out.write_char('}')
}

/// Top-level strings render bare; strings inside lists and maps are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            nested => write_nested(f, nested),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => |$v:ident| $build:expr),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from($v: $source) -> Self {
                    $build
                }
            }
        )+
    };
}

value_from! {
    bool => |b| Value::Bool(b),
    i64 => |n| Value::Int(n),
    i32 => |n| Value::Int(i64::from(n)),
    u32 => |n| Value::Int(i64::from(n)),
    f64 => |x| Value::Float(x),
    String => |s| Value::String(s),
    &str => |s| Value::String(s.to_owned()),
    Metadata => |fields| Value::Map(fields),
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_string_is_bare() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::from(7).to_string(), "7");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_nested_strings_are_quoted() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), r#"["a", "b"]"#);

        let mut fields = Metadata::new();
        fields.insert("id".into(), 7.into());
        fields.insert("user".into(), "alice".into());
        assert_eq!(Value::Map(fields).to_string(), r#"{id: 7, user: "alice"}"#);
    }

    #[test]
    fn test_inline_fields() {
        assert_eq!(inline_fields(&Metadata::new()), "");

        let mut fields = Metadata::new();
        fields.insert("order".into(), 42.into());
        fields.insert("tags".into(), vec!["new"].into());
        assert_eq!(inline_fields(&fields), r#"{order: 42, tags: ["new"]}"#);
    }

    #[test]
    fn test_value_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    }
}
