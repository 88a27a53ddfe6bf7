//! deep-assert-value - Typed value tree compared by `deep-assert`.
//!
//! Arbitrary Rust values are reflected once into a [`Value`] tree through
//! serde (see [`to_value`]), after which every node classifies into exactly
//! one [`Kind`]: record, sequence, mapping or scalar. The tree also carries
//! the stable, type-qualified rendering used in mismatch reports.

mod error;
mod json;
mod render;
mod ser;
mod value;

pub use error::ReflectError;
pub use ser::{to_value, Serializer};
pub use value::{Field, Kind, Record, Value, FLOAT_TYPE, TIMESTAMP_TYPE};
