use deep_assert_value::Value;

use super::MISSING_EXPECTED;
use crate::comparator::{present, Comparator, DefaultComparator};

/// Compares floats after rounding both to `decimal_places`.
///
/// Rounding is half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatRound {
    decimal_places: i32,
}

impl FloatRound {
    pub fn new(decimal_places: i32) -> Self {
        Self { decimal_places }
    }
}

pub fn float_rounded_to(decimal_places: i32) -> FloatRound {
    FloatRound::new(decimal_places)
}

impl Comparator for FloatRound {
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String {
        let Some(expected) = present(expected) else {
            return MISSING_EXPECTED.to_string();
        };
        match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) => default.check(
                Some(&Value::Float(round_to(a, self.decimal_places))),
                Some(&Value::Float(round_to(e, self.decimal_places))),
            ),
            _ => default.check(actual, Some(expected)),
        }
    }
}

/// Precision beyond what `f64` can scale to leaves `num` as is.
fn round_to(num: f64, decimal_places: i32) -> f64 {
    let scale = 10_f64.powi(decimal_places);
    if !scale.is_finite() || scale == 0.0 {
        return num;
    }
    (num * scale).round() / scale
}

/// Accepts floats no further apart than `tolerance`.
///
/// A tolerance of zero (or less) means exact comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatTolerance {
    tolerance: f64,
}

impl FloatTolerance {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

pub fn float_within(tolerance: f64) -> FloatTolerance {
    FloatTolerance::new(tolerance)
}

impl Comparator for FloatTolerance {
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String {
        let Some(expected) = present(expected) else {
            return MISSING_EXPECTED.to_string();
        };
        match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) if self.tolerance > 0.0 => {
                if (a - e).abs() <= self.tolerance {
                    String::new()
                } else {
                    format!(
                        "Expected: {e:?}\nActual:   {a:?}\n(Should be within {:?})!",
                        self.tolerance
                    )
                }
            }
            _ => default.check(actual, Some(expected)),
        }
    }
}
