//! deep-assert - Deep structural equality for test assertions.
//!
//! [`compare`] walks an actual and an expected [`Value`] side by side and
//! returns a [`Comparison`]: a verdict plus one `Path: <path>\n<reason>`
//! block per failing node. Callers swap in their own [`Comparator`] for a
//! field (keyed by index-normalized path such as `$.Items[].Name`) or for a
//! type (keyed by type name such as `f64`) through [`Overrides`]; path keys
//! win over type keys.
//!
//! ```
//! use std::time::Duration;
//! use deep_assert::{compare, catalog, Overrides, Record, Value, TIMESTAMP_TYPE};
//!
//! let overrides = Overrides::new()
//!     .with("$.Price", catalog::float_within(0.01))
//!     .with(TIMESTAMP_TYPE, catalog::timestamp_truncated_to(Duration::from_secs(60)));
//!
//! let actual = Value::from(Record::new("Quote").field("Price", 1.004));
//! let expected = Value::from(Record::new("Quote").field("Price", 1.0));
//! assert!(compare(&actual, &expected, &overrides).matched());
//! ```

pub mod catalog;
mod comparator;
mod equality;
mod mutator;
mod options;
pub mod path;
mod registry;
mod report;
mod walker;

pub use comparator::{from_fn, present, Comparator, DefaultComparator};
pub use deep_assert_value::{
    to_value, Field, Kind, Record, ReflectError, Value, FLOAT_TYPE, TIMESTAMP_TYPE,
};
pub use equality::ShouldEqual;
pub use mutator::{order_insensitive, Mutator, OrderInsensitive};
pub use options::{Options, DEFAULT_MAX_DEPTH};
pub use registry::Overrides;
pub use report::{Comparison, Failure};
pub use walker::{compare, compare_serialized, Walker};
