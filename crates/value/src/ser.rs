//! Structural reflection: any `Serialize` type into a [`Value`] tree.
//!
//! Shaped after `serde_json::value::Serializer`, but keeps what JSON throws
//! away: struct type names, declaration order, `Some` wrappers, non-string
//! map keys, and `SystemTime` as an atomic timestamp.
//!
//! Newtype and tuple structs are transparent. Enum variants carrying data are
//! externally tagged: a record named after the enum with one field named
//! after the variant.

use chrono::DateTime;
use serde::ser::{self, Serialize};

use crate::error::ReflectError;
use crate::value::{Field, Record, Value};

/// Reflects `value` into a [`Value`] tree.
pub fn to_value<T>(value: &T) -> Result<Value, ReflectError>
where
    T: ?Sized + Serialize,
{
    value.serialize(Serializer)
}

/// Serializer producing [`Value`] trees.
pub struct Serializer;

impl ser::Serializer for Serializer {
    type Ok = Value;
    type Error = ReflectError;

    type SerializeSeq = SerializeSeq;
    type SerializeTuple = SerializeSeq;
    type SerializeTupleStruct = SerializeSeq;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value, ReflectError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, ReflectError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, ReflectError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, ReflectError> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, ReflectError> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, ReflectError> {
        if let Ok(small) = i64::try_from(v) {
            Ok(Value::Int(small))
        } else if let Ok(small) = u64::try_from(v) {
            Ok(Value::UInt(small))
        } else {
            Err(ReflectError::IntegerOverflow(v.to_string()))
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value, ReflectError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, ReflectError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, ReflectError> {
        Ok(Value::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, ReflectError> {
        Ok(Value::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, ReflectError> {
        u64::try_from(v)
            .map(Value::UInt)
            .map_err(|_| ReflectError::IntegerOverflow(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, ReflectError> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, ReflectError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, ReflectError> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, ReflectError> {
        Ok(Value::Str(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, ReflectError> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, ReflectError> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, ReflectError>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Optional(Box::new(value.serialize(Serializer)?)))
    }

    fn serialize_unit(self) -> Result<Value, ReflectError> {
        Ok(Value::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, ReflectError> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, ReflectError> {
        Ok(Value::Variant {
            name: name.to_owned(),
            variant: variant.to_owned(),
        })
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, ReflectError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, ReflectError>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(name, variant, value.serialize(Serializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeSeq, ReflectError> {
        Ok(SerializeSeq {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeSeq, ReflectError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeSeq, ReflectError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, ReflectError> {
        Ok(SerializeTupleVariant {
            name,
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, ReflectError> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<SerializeStruct, ReflectError> {
        Ok(SerializeStruct {
            record: Record {
                type_name: name.to_owned(),
                fields: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, ReflectError> {
        Ok(SerializeStructVariant {
            name,
            variant,
            record: Record {
                type_name: format!("{name}::{variant}"),
                fields: Vec::with_capacity(len),
            },
        })
    }
}

fn tagged(name: &str, variant: &str, payload: Value) -> Value {
    Value::Record(Record {
        type_name: name.to_owned(),
        fields: vec![Field {
            name: variant.to_owned(),
            value: payload,
        }],
    })
}

pub struct SerializeSeq {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SerializeSeq {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ReflectError> {
        Ok(Value::Seq(self.items))
    }
}

impl ser::SerializeTuple for SerializeSeq {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, ReflectError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeSeq {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, ReflectError> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    name: &'static str,
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, ReflectError> {
        Ok(tagged(self.name, self.variant, Value::Seq(self.items)))
    }
}

pub struct SerializeMap {
    entries: Vec<(Value, Value)>,
    next_key: Option<Value>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        self.next_key = Some(key.serialize(Serializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        let key = self.next_key.take().ok_or(ReflectError::ValueWithoutKey)?;
        let value = value.serialize(Serializer)?;
        // Later duplicates replace earlier ones, keeping keys unique. `Value`
        // has no hash or total order, so this is a linear scan per entry.
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    fn end(self) -> Result<Value, ReflectError> {
        Ok(Value::Map(self.entries))
    }
}

pub struct SerializeStruct {
    record: Record,
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        self.record.fields.push(Field {
            name: key.to_owned(),
            value: value.serialize(Serializer)?,
        });
        Ok(())
    }

    fn end(self) -> Result<Value, ReflectError> {
        Ok(system_time(&self.record).unwrap_or(Value::Record(self.record)))
    }
}

pub struct SerializeStructVariant {
    name: &'static str,
    variant: &'static str,
    record: Record,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = ReflectError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), ReflectError>
    where
        T: ?Sized + Serialize,
    {
        self.record.fields.push(Field {
            name: key.to_owned(),
            value: value.serialize(Serializer)?,
        });
        Ok(())
    }

    fn end(self) -> Result<Value, ReflectError> {
        Ok(tagged(self.name, self.variant, Value::Record(self.record)))
    }
}

/// `std::time::SystemTime` serializes as a two-field struct; fold it back
/// into an atomic timestamp so it is never walked field by field.
fn system_time(record: &Record) -> Option<Value> {
    if record.type_name != "SystemTime" || record.len() != 2 {
        return None;
    }
    let secs = match record.get("secs_since_epoch")? {
        Value::UInt(secs) => i64::try_from(*secs).ok()?,
        _ => return None,
    };
    let nanos = match record.get("nanos_since_epoch")? {
        Value::UInt(nanos) => u32::try_from(*nanos).ok()?,
        _ => return None,
    };
    DateTime::from_timestamp(secs, nanos).map(Value::Timestamp)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn scalars_keep_their_width_class() {
        assert_eq!(to_value(&3_i8).unwrap(), Value::Int(3));
        assert_eq!(to_value(&3_u16).unwrap(), Value::UInt(3));
        assert_eq!(to_value(&1.5_f32).unwrap(), Value::Float(1.5));
        assert_eq!(to_value("hi").unwrap(), Value::from("hi"));
        assert_eq!(to_value(&()).unwrap(), Value::Unit);
    }

    #[test]
    fn options_wrap_present_values() {
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Null);
        assert_eq!(
            to_value(&Some(4_i32)).unwrap(),
            Value::Optional(Box::new(Value::Int(4)))
        );
    }

    #[test]
    fn wide_integers_overflow_into_errors() {
        assert_eq!(to_value(&(u64::MAX as u128)).unwrap(), Value::UInt(u64::MAX));
        assert!(matches!(
            to_value(&u128::MAX),
            Err(ReflectError::IntegerOverflow(_))
        ));
        assert!(matches!(
            to_value(&i128::MIN),
            Err(ReflectError::IntegerOverflow(_))
        ));
    }

    #[test]
    fn maps_keep_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert(2_u8, "two");
        map.insert(1_u8, "one");
        let value = to_value(&map).unwrap();
        assert_eq!(value.get_entry(&Value::UInt(2)), Some(&Value::from("two")));
    }

    #[test]
    fn duplicate_map_keys_keep_last_value() {
        struct Repeated;

        impl Serialize for Repeated {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap as _;
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("a", &1)?;
                map.serialize_entry("b", &2)?;
                map.serialize_entry("a", &3)?;
                map.end()
            }
        }

        let value = to_value(&Repeated).unwrap();
        assert_eq!(value, Value::map([("a", 3), ("b", 2)]));
        assert_eq!(value.get_entry(&Value::from("a")), Some(&Value::Int(3)));
    }
}
