//! The recursive comparison walk.

use deep_assert_value::{to_value, Record, ReflectError, Value};
use serde::Serialize;
use tracing::{debug, trace};

use crate::comparator::{present, DefaultComparator};
use crate::equality::{render, ShouldEqual};
use crate::options::Options;
use crate::path;
use crate::registry::Overrides;
use crate::report::Comparison;

/// Compares two values with the stock [`Walker`].
pub fn compare(actual: &Value, expected: &Value, overrides: &Overrides) -> Comparison {
    Walker::default().compare(actual, expected, overrides)
}

/// Reflects both operands through serde, then compares them with the stock
/// [`Walker`].
pub fn compare_serialized<A, E>(
    actual: &A,
    expected: &E,
    overrides: &Overrides,
) -> Result<Comparison, ReflectError>
where
    A: ?Sized + Serialize,
    E: ?Sized + Serialize,
{
    Walker::default().compare_serialized(actual, expected, overrides)
}

/// Depth-first comparison engine.
///
/// Holds the baseline comparator used for scalar leaves and whole-node
/// fallbacks; swap it with [`Walker::with_default`].
#[derive(Debug, Clone)]
pub struct Walker<D = ShouldEqual> {
    default: D,
    options: Options,
}

impl Default for Walker {
    fn default() -> Self {
        Walker::with_default(ShouldEqual)
    }
}

impl<D: DefaultComparator> Walker<D> {
    pub fn with_default(default: D) -> Self {
        Self {
            default,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn compare(&self, actual: &Value, expected: &Value, overrides: &Overrides) -> Comparison {
        let result = self.walk(Some(actual), Some(expected), overrides, path::ROOT, 0);
        debug!(
            matched = result.matched(),
            failures = result.failures().len(),
            "comparison finished"
        );
        result
    }

    pub fn compare_serialized<A, E>(
        &self,
        actual: &A,
        expected: &E,
        overrides: &Overrides,
    ) -> Result<Comparison, ReflectError>
    where
        A: ?Sized + Serialize,
        E: ?Sized + Serialize,
    {
        let actual = to_value(actual)?;
        let expected = to_value(expected)?;
        Ok(self.compare(&actual, &expected, overrides))
    }

    fn walk(
        &self,
        mut actual: Option<&Value>,
        mut expected: Option<&Value>,
        overrides: &Overrides,
        path: &str,
        depth: usize,
    ) -> Comparison {
        // An optional facing another optional or an absent side is unwrapped,
        // so the node is typed by its target.
        loop {
            match (actual, expected) {
                (Some(Value::Optional(a)), Some(Value::Optional(e))) => {
                    actual = Some(&**a);
                    expected = Some(&**e);
                }
                (Some(Value::Optional(a)), None | Some(Value::Null)) => actual = Some(&**a),
                (None | Some(Value::Null), Some(Value::Optional(e))) => expected = Some(&**e),
                _ => break,
            }
        }
        let (actual, expected) = (present(actual), present(expected));
        if actual.is_none() && expected.is_none() {
            return Comparison::default();
        }

        // Overrides also receive absent operands.
        let type_name = actual.or(expected).map(Value::type_name);
        if let Some(comparator) = overrides.resolve(path, type_name.as_deref()) {
            trace!(path, type_name = type_name.as_deref(), "override applied");
            return Comparison::check(path, comparator.compare(actual, expected, &self.default));
        }

        let (Some(actual), Some(expected)) = (actual, expected) else {
            return Comparison::fail(
                path,
                format!("Expected: {}\nActual: {}", render(expected), render(actual)),
            );
        };

        if depth > self.options.max_depth {
            return Comparison::fail(
                path,
                format!(
                    "Maximum comparison depth {} exceeded",
                    self.options.max_depth
                ),
            );
        }

        match (actual, expected) {
            (Value::Timestamp(_), _) => self.whole(actual, expected, path),
            (Value::Record(a), Value::Record(e)) if a.len() == e.len() => {
                self.walk_record(a, e, overrides, path, depth)
            }
            (Value::Seq(a), Value::Seq(e)) if a.len() == e.len() => {
                let mut result = Comparison::default();
                for (idx, (a, e)) in a.iter().zip(e).enumerate() {
                    let item_path = path::index(path, idx);
                    result.merge(self.walk(Some(a), Some(e), overrides, &item_path, depth + 1));
                }
                result
            }
            (Value::Map(a), Value::Map(e)) if a.len() == e.len() => {
                self.walk_map(a, expected, overrides, path, depth)
            }
            _ => self.whole(actual, expected, path),
        }
    }

    fn walk_record(
        &self,
        actual: &Record,
        expected: &Record,
        overrides: &Overrides,
        path: &str,
        depth: usize,
    ) -> Comparison {
        let mut result = Comparison::default();
        for field in &actual.fields {
            let field_path = path::field(path, &field.name);
            let Some(other) = expected.get(&field.name) else {
                result.merge(Comparison::fail(
                    field_path,
                    format!("Field {} not found in expected", field.name),
                ));
                return result;
            };
            result.merge(self.walk(
                Some(&field.value),
                Some(other),
                overrides,
                &field_path,
                depth + 1,
            ));
        }
        result
    }

    fn walk_map(
        &self,
        actual: &[(Value, Value)],
        expected: &Value,
        overrides: &Overrides,
        path: &str,
        depth: usize,
    ) -> Comparison {
        // Sorted so reports are stable whatever order the source map used.
        let mut entries: Vec<_> = actual
            .iter()
            .map(|(key, value)| (key.key_string(), key, value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut result = Comparison::default();
        for (key_text, key, value) in entries {
            let entry_path = path::key(path, &key_text);
            let Some(other) = expected.get_entry(key) else {
                result.merge(Comparison::fail(
                    entry_path,
                    format!("Key {key_text} not found in expected"),
                ));
                return result;
            };
            result.merge(self.walk(Some(value), Some(other), overrides, &entry_path, depth + 1));
        }
        result
    }

    /// Compares two nodes as opaque wholes with the baseline comparator.
    fn whole(&self, actual: &Value, expected: &Value, path: &str) -> Comparison {
        trace!(path, "whole-node comparison");
        Comparison::check(path, self.default.check(Some(actual), Some(expected)))
    }
}
