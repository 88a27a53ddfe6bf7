use std::time::Duration;

use chrono::{DateTime, Utc};
use deep_assert_value::Value;

use super::MISSING_EXPECTED;
use crate::comparator::{present, Comparator, DefaultComparator};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Compares timestamps after truncating both to `granularity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampTruncate {
    granularity: Duration,
}

impl TimestampTruncate {
    pub fn new(granularity: Duration) -> Self {
        Self { granularity }
    }
}

pub fn timestamp_truncated_to(granularity: Duration) -> TimestampTruncate {
    TimestampTruncate::new(granularity)
}

impl Comparator for TimestampTruncate {
    fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        default: &dyn DefaultComparator,
    ) -> String {
        let Some(expected) = present(expected) else {
            return MISSING_EXPECTED.to_string();
        };
        match (actual.and_then(Value::as_timestamp), expected.as_timestamp()) {
            (Some(a), Some(e)) => default.check(
                Some(&Value::Timestamp(truncate(a, self.granularity))),
                Some(&Value::Timestamp(truncate(e, self.granularity))),
            ),
            _ => default.check(actual, Some(expected)),
        }
    }
}

/// Rounds `t` down to a whole multiple of `granularity` since the Unix
/// epoch. A zero granularity leaves `t` unchanged.
fn truncate(t: DateTime<Utc>, granularity: Duration) -> DateTime<Utc> {
    let step = i128::try_from(granularity.as_nanos()).unwrap_or(i128::MAX);
    if step == 0 {
        return t;
    }
    let nanos = i128::from(t.timestamp()) * NANOS_PER_SEC + i128::from(t.timestamp_subsec_nanos());
    let truncated = nanos - nanos.rem_euclid(step);
    let secs = i64::try_from(truncated.div_euclid(NANOS_PER_SEC)).ok();
    let subsec = u32::try_from(truncated.rem_euclid(NANOS_PER_SEC)).ok();
    secs.zip(subsec)
        .and_then(|(secs, subsec)| DateTime::from_timestamp(secs, subsec))
        .unwrap_or(t)
}
