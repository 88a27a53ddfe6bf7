use std::fmt;

use deep_assert_value::Value;

use super::MISSING_EXPECTED;
use crate::comparator::{present, Comparator, DefaultComparator};

type Cleanup = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Compares strings after passing both through a cleanup function.
pub struct StringCleanup {
    cleanup: Option<Cleanup>,
}

impl StringCleanup {
    pub fn new<F>(cleanup: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// No cleanup: strings compare exactly.
    pub fn none() -> Self {
        Self { cleanup: None }
    }
}

pub fn string_cleaned_with<F>(cleanup: F) -> StringCleanup
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    StringCleanup::new(cleanup)
}

impl fmt::Debug for StringCleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringCleanup")
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

impl Comparator for StringCleanup {
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String {
        let Some(expected) = present(expected) else {
            return MISSING_EXPECTED.to_string();
        };
        match (&self.cleanup, actual.and_then(Value::as_str), expected.as_str()) {
            (Some(cleanup), Some(a), Some(e)) => default.check(
                Some(&Value::Str(cleanup(a))),
                Some(&Value::Str(cleanup(e))),
            ),
            _ => default.check(actual, Some(expected)),
        }
    }
}
