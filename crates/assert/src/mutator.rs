//! Pre-comparison normalization of operand pairs.

use std::cmp::Ordering;

use deep_assert_value::Value;

use crate::comparator::present;

/// Rewrites an `(actual, expected)` pair before it is compared.
///
/// Mutators change representation, not verdicts: apply one to a pair and
/// hand the results to [`compare`](crate::compare).
pub trait Mutator {
    fn mutate(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
    ) -> (Option<Value>, Option<Value>);
}

impl<F> Mutator for F
where
    F: Fn(Option<&Value>, Option<&Value>) -> (Option<Value>, Option<Value>),
{
    fn mutate(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
    ) -> (Option<Value>, Option<Value>) {
        self(actual, expected)
    }
}

/// Sorts two sequences by the same ordering so that element order stops
/// mattering.
///
/// Both sides must be sequences whose elements all share one type name;
/// anything else, or an absent expected value, passes through unchanged.
/// The inputs are never modified.
pub struct OrderInsensitive<L> {
    less: L,
}

impl<L> OrderInsensitive<L>
where
    L: Fn(&Value, &Value) -> bool,
{
    pub fn new(less: L) -> Self {
        Self { less }
    }

    fn sorted(&self, items: &[Value]) -> Vec<Value> {
        let mut items = items.to_vec();
        items.sort_by(|a, b| {
            if (self.less)(a, b) {
                Ordering::Less
            } else if (self.less)(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        items
    }
}

pub fn order_insensitive<L>(less: L) -> OrderInsensitive<L>
where
    L: Fn(&Value, &Value) -> bool,
{
    OrderInsensitive::new(less)
}

impl<L> Mutator for OrderInsensitive<L>
where
    L: Fn(&Value, &Value) -> bool,
{
    fn mutate(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
    ) -> (Option<Value>, Option<Value>) {
        match (actual, present(expected)) {
            (Some(Value::Seq(a)), Some(Value::Seq(e))) if same_element_type(a, e) => (
                Some(Value::Seq(self.sorted(a))),
                Some(Value::Seq(self.sorted(e))),
            ),
            _ => (actual.cloned(), expected.cloned()),
        }
    }
}

fn same_element_type(actual: &[Value], expected: &[Value]) -> bool {
    let mut names = actual.iter().chain(expected).map(Value::type_name);
    match names.next() {
        Some(first) => names.all(|name| name == first),
        None => true,
    }
}
