use std::fmt;

use deep_assert_value::Value;

use crate::comparator::{present, Comparator, DefaultComparator};

/// Always matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skip;

pub fn skip() -> Skip {
    Skip
}

impl Comparator for Skip {
    fn compare(
        &self,
        _actual: Option<&Value>,
        _expected: Option<&Value>,
        _default: &dyn DefaultComparator,
    ) -> String {
        String::new()
    }
}

/// Matches whenever `condition` holds for the raw operands; otherwise
/// defers to the inner comparator, or to the default comparator when there
/// is none.
pub struct SkipIf<P> {
    condition: P,
    inner: Option<Box<dyn Comparator>>,
}

impl<P> SkipIf<P>
where
    P: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync,
{
    pub fn new(condition: P) -> Self {
        Self {
            condition,
            inner: None,
        }
    }

    /// Comparator consulted when the condition does not hold.
    pub fn otherwise(mut self, inner: impl Comparator + 'static) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }
}

pub fn skip_if<P>(condition: P) -> SkipIf<P>
where
    P: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync,
{
    SkipIf::new(condition)
}

impl<P> fmt::Debug for SkipIf<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipIf")
            .field("inner", &self.inner.is_some())
            .finish_non_exhaustive()
    }
}

impl<P> Comparator for SkipIf<P>
where
    P: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync,
{
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String {
        if (self.condition)(actual, expected) {
            return String::new();
        }
        match &self.inner {
            Some(inner) => inner.compare(actual, expected, default),
            None => default.check(actual, expected),
        }
    }
}

/// Condition: no expected value was supplied.
pub fn is_absent_expected(_actual: Option<&Value>, expected: Option<&Value>) -> bool {
    present(expected).is_none()
}

/// Condition: no actual value was produced.
pub fn is_absent_actual(actual: Option<&Value>, _expected: Option<&Value>) -> bool {
    present(actual).is_none()
}
