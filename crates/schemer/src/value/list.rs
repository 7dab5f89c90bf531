//! Iteration over pair chains

use super::Value;

/// Iterator over the cars of a pair chain.
///
/// Stops at the first cdr that is not a pair; [`ListIter::tail`] then
/// reports that final cdr, which is `Null` for a proper list.
///
/// # Example
///
/// ```
/// use schemer::Value;
///
/// let dotted = Value::list_with_tail(
///     vec![Value::Number(1.0), Value::Number(2.0)],
///     Value::Number(3.0),
/// );
/// let mut iter = dotted.iter();
/// assert_eq!(iter.by_ref().count(), 2);
/// assert_eq!(iter.tail(), &Value::Number(3.0));
/// ```
#[derive(Clone)]
pub struct ListIter {
    current: Value,
}

impl ListIter {
    /// Start iterating at `value`.
    pub fn new(value: Value) -> Self {
        Self { current: value }
    }

    /// What remains: the final cdr once iteration has finished.
    pub fn tail(&self) -> &Value {
        &self.current
    }

    /// Check whether the remaining chain ended in `()`.
    pub fn is_proper(&self) -> bool {
        self.current.is_null()
    }
}

impl Iterator for ListIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let (car, cdr) = match &self.current {
            Value::Pair(pair) => (pair.car(), pair.cdr()),
            _ => return None,
        };
        self.current = cdr;
        Some(car)
    }
}
