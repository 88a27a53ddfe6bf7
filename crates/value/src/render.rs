//! Stable, type-qualified rendering used in mismatch diagnostics.
//!
//! Two values of different types never render identically: `1` is an
//! integer, `1.0` a float and `"1"` a string. Mapping entries render sorted
//! by key so output is reproducible for golden tests.

use std::fmt;

use chrono::SecondsFormat;

use crate::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<none>"),
            Value::Optional(inner) => write!(f, "Some({inner})"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Char(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v:?}"),
            Value::Bytes(v) => write!(f, "bytes{v:?}"),
            Value::Unit => f.write_str("()"),
            Value::Variant { name, variant } => write!(f, "{name}::{variant}"),
            Value::Timestamp(t) => write!(
                f,
                "Timestamp({})",
                t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            ),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_by_cached_key(|(key, _)| key.key_string().into_owned());
                f.write_str("{")?;
                for (idx, (key, value)) in sorted.into_iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Record(record) => {
                if !record.type_name.is_empty() {
                    write!(f, "{} ", record.type_name)?;
                }
                if record.fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (idx, field) in record.fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                f.write_str(" }")
            }
        }
    }
}
