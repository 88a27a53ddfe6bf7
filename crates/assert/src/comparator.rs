//! Comparator contracts shared by the walker, the registry and the catalog.

use deep_assert_value::Value;

/// Baseline single-value equality.
///
/// Returns an empty string when the operands are equal; otherwise a
/// diagnostic that renders both operands. `None` stands for an absent value.
pub trait DefaultComparator: Send + Sync {
    fn check(&self, actual: Option<&Value>, expected: Option<&Value>) -> String;
}

/// Override comparator consulted in place of the default walk.
///
/// An empty result means match, anything else is used verbatim as the
/// failure reason. `expected` is `None` when no expected value was supplied.
/// `default` is the walker's baseline comparator, for delegation.
///
/// Any `Fn(Option<&Value>, Option<&Value>) -> String` closure is a
/// comparator.
pub trait Comparator: Send + Sync {
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String;
}

impl<F> Comparator for F
where
    F: Fn(Option<&Value>, Option<&Value>) -> String + Send + Sync,
{
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        _default: &dyn DefaultComparator,
    ) -> String {
        self(actual, expected)
    }
}

/// Pins a closure to the comparator signature so its argument types need no
/// annotations.
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(Option<&Value>, Option<&Value>) -> String + Send + Sync + 'static,
{
    f
}

/// Folds the explicit absence marker into `None`.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}
