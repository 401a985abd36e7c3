//! Positional parameter numbering.

use crate::value::Value;

/// Hands out `$1, $2, ...` placeholders and records the bound values in the same order.
///
/// One sequencer is threaded by `&mut` through every clause of a statement render,
/// so the n-th placeholder in the SQL text always matches `values()[n - 1]`.
#[derive(Clone, Debug, Default)]
pub struct ValueSequencer {
    values: Vec<Value>,
}

impl ValueSequencer {
    /// Create a new sequencer starting at `$1`.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Bind `value` and return its placeholder token.
    pub fn next(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    /// Number of values bound so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the sequencer, returning the bound values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
