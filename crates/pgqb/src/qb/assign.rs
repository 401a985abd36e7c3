//! Ordered column assignments for INSERT and UPDATE.

use crate::config::IdentPolicy;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::value::Value;
use serde::Serialize;

/// Column → value pairs in first-set order. Setting a column again replaces its
/// value but keeps its position.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    pairs: Vec<(String, Value)>,
}

impl Assignments {
    pub(crate) fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub(crate) fn set(
        &mut self,
        column: &str,
        value: Value,
        policy: IdentPolicy,
        build_error: &mut Option<QbError>,
    ) {
        let column = ident::sanitize_deferred(column, IdentKind::Field, policy, build_error);
        match self.pairs.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((column, value)),
        }
    }

    /// Merge every field of a serializable struct or map.
    pub(crate) fn merge<T: Serialize + ?Sized>(
        &mut self,
        value: &T,
        policy: IdentPolicy,
        build_error: &mut Option<QbError>,
    ) -> QbResult<()> {
        let serde_json::Value::Object(map) = serde_json::to_value(value)? else {
            return Err(QbError::validation(
                "obj() expects a struct or map that serializes to a JSON object",
            ));
        };
        for (column, v) in map {
            self.set(&column, Value::from_json(v), policy, build_error);
        }
        Ok(())
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(c, _)| c.as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(c, v)| (c.as_str(), v))
    }
}
