//! Ready-made override comparators.
//!
//! Every entry follows the [`Comparator`](crate::Comparator) contract. All
//! but the skip family report [`MISSING_EXPECTED`] when no expected value is
//! supplied, and hand operands they do not understand to the walker's
//! default comparator untouched.

mod float;
mod skip;
mod string;
mod time;

pub use float::{float_rounded_to, float_within, FloatRound, FloatTolerance};
pub use skip::{is_absent_actual, is_absent_expected, skip, skip_if, Skip, SkipIf};
pub use string::{string_cleaned_with, StringCleanup};
pub use time::{timestamp_truncated_to, TimestampTruncate};

/// Diagnostic for an override invoked without an expected value.
pub const MISSING_EXPECTED: &str = "expected value is missing";
