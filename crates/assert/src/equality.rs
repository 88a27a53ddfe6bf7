//! The stock baseline comparator.

use deep_assert_value::Value;

use crate::comparator::{present, DefaultComparator};

/// Strict equality with no coercion between types.
///
/// Mismatches render as
///
/// ```text
/// Expected: <expected>
/// Actual:   <actual>
/// (Should equal)!
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShouldEqual;

impl DefaultComparator for ShouldEqual {
    fn check(&self, actual: Option<&Value>, expected: Option<&Value>) -> String {
        let (actual, expected) = (present(actual), present(expected));
        let equal = match (actual, expected) {
            (None, None) => true,
            (Some(a), Some(e)) => a == e,
            _ => false,
        };
        if equal {
            return String::new();
        }
        format!(
            "Expected: {}\nActual:   {}\n(Should equal)!",
            render(expected),
            render(actual)
        )
    }
}

/// Renders a possibly absent operand.
pub(crate) fn render(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => Value::Null.to_string(),
    }
}
