//! The value tree and its structural classification.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

/// Type name reported for [`Value::Timestamp`] nodes.
pub const TIMESTAMP_TYPE: &str = "Timestamp";
/// Type name reported for [`Value::Float`] nodes.
pub const FLOAT_TYPE: &str = "f64";

/// Structural kind of a node, decided independently for each side of a
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Named-field composite.
    Record,
    /// Ordered, index-addressable composite.
    Sequence,
    /// Key to value composite with unique keys.
    Mapping,
    /// Everything else, timestamps included.
    Scalar,
}

/// Runtime value of unknown shape.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence marker (`None`, JSON `null`).
    Null,
    /// Optional wrapper around a present value (`Some(..)`).
    Optional(Box<Value>),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    /// `()`.
    Unit,
    /// Unit enum variant.
    Variant { name: String, variant: String },
    /// Point in time, always compared atomically.
    Timestamp(DateTime<Utc>),
    Seq(Vec<Value>),
    /// Entries keep their insertion order; keys are unique.
    Map(Vec<(Value, Value)>),
    Record(Record),
}

/// Named-field composite with fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Type name; empty for anonymous records.
    pub type_name: String,
    pub fields: Vec<Field>,
}

/// One named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, builder style.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Looks a field up by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Value {
    /// Builds a mapping from `(key, value)` pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a sequence from anything convertible into values.
    pub fn seq<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Record(_) => Kind::Record,
            Value::Seq(_) => Kind::Sequence,
            Value::Map(_) => Kind::Mapping,
            _ => Kind::Scalar,
        }
    }

    /// `true` for the absence marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    /// Name of the runtime type, used as an override key.
    pub fn type_name(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Optional(inner) => Cow::Owned(format!("Option<{}>", inner.type_name())),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Int(_) => Cow::Borrowed("i64"),
            Value::UInt(_) => Cow::Borrowed("u64"),
            Value::Float(_) => Cow::Borrowed(FLOAT_TYPE),
            Value::Char(_) => Cow::Borrowed("char"),
            Value::Str(_) => Cow::Borrowed("String"),
            Value::Bytes(_) => Cow::Borrowed("bytes"),
            Value::Unit => Cow::Borrowed("()"),
            Value::Variant { name, .. } => Cow::Borrowed(name),
            Value::Timestamp(_) => Cow::Borrowed(TIMESTAMP_TYPE),
            Value::Seq(_) => Cow::Borrowed("Seq"),
            Value::Map(_) => Cow::Borrowed("Map"),
            Value::Record(record) => Cow::Borrowed(&record.type_name),
        }
    }

    /// Text used when this value addresses a mapping entry in a path.
    ///
    /// String keys appear verbatim, every other key in its rendered form.
    pub fn key_string(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Finds the value stored under `key` in a mapping.
    pub fn get_entry(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => lookup(entries, key),
            _ => None,
        }
    }
}

// Linear: maps are compared entry by entry, so a walk over an n-entry map
// is quadratic in n.
fn lookup<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Unit, Value::Unit) => true,
            (Value::Optional(a), Value::Optional(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (
                Value::Variant {
                    name: n1,
                    variant: v1,
                },
                Value::Variant {
                    name: n2,
                    variant: v2,
                },
            ) => n1 == n2 && v1 == v2,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            // Entry order carries no meaning.
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, value)| lookup(b, key).is_some_and(|other| value == other))
            }
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => Value::Optional(Box::new(inner.into())),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::seq(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_type_names() {
        let record = Value::from(Record::new("Order").field("Id", 7));
        assert_eq!(record.kind(), Kind::Record);
        assert_eq!(record.type_name(), "Order");
        assert_eq!(Value::seq([1, 2]).kind(), Kind::Sequence);
        assert_eq!(Value::map([("a", 1)]).kind(), Kind::Mapping);
        assert_eq!(Value::from(1.5).type_name(), FLOAT_TYPE);
        assert_eq!(Value::from(Some(1.5)).type_name(), "Option<f64>");
        assert_eq!(Value::from(Utc::now()).kind(), Kind::Scalar);
    }

    #[test]
    fn map_equality_ignores_entry_order() {
        let a = Value::map([("a", 1), ("b", 2)]);
        let b = Value::map([("b", 2), ("a", 1)]);
        assert_eq!(a, b);
        assert_ne!(a, Value::map([("a", 1), ("b", 3)]));
    }

    #[test]
    fn integers_are_not_coerced() {
        assert_ne!(Value::Int(1), Value::UInt(1));
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn key_string_leaves_strings_unquoted() {
        assert_eq!(Value::from("id").key_string(), "id");
        assert_eq!(Value::from(3).key_string(), "3");
    }
}
