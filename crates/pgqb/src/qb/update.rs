//! UPDATE query builder.

use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::assign::Assignments;
use crate::qb::expr::ConditionTree;
use crate::qb::param::ValueSequencer;
use crate::qb::traits::{SqlQb, StatementKind, WhereQb};
use crate::value::Value;
use serde::Serialize;

/// UPDATE query builder.
///
/// Renders `UPDATE table SET c1 = $1, c2 = $2 [WHERE ...] [RETURNING ...]`. Unlike
/// DELETE there is no guard against an UPDATE without conditions.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    /// Table name
    table: String,
    /// SET clauses
    assignments: Assignments,
    /// WHERE conditions
    conditions: ConditionTree,
    /// RETURNING columns
    returning_cols: Vec<String>,
    config: QbConfig,
    build_error: Option<QbError>,
}

impl UpdateQb {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self::with_config(table, QbConfig::default())
    }

    /// Create a new UPDATE builder with explicit policies.
    pub fn with_config(table: &str, config: QbConfig) -> Self {
        let mut build_error = None;
        let table =
            ident::sanitize_deferred(table, IdentKind::List, config.ident_policy, &mut build_error);
        Self {
            table,
            assignments: Assignments::new(),
            conditions: ConditionTree::new(),
            returning_cols: Vec::new(),
            config,
            build_error,
        }
    }

    /// Set a column value. Setting the same column twice keeps the last value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.assignments.set(
            column,
            value.into(),
            self.config.ident_policy,
            &mut self.build_error,
        );
        self
    }

    /// Set every field of a serializable struct or map, in field order.
    pub fn obj<T: Serialize + ?Sized>(mut self, value: &T) -> QbResult<Self> {
        self.assignments
            .merge(value, self.config.ident_policy, &mut self.build_error)?;
        Ok(self)
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, cols: &[&str]) -> Self {
        let policy = self.config.ident_policy;
        self.returning_cols = cols
            .iter()
            .map(|col| ident::sanitize_deferred(col, IdentKind::Field, policy, &mut self.build_error))
            .collect();
        self
    }
}

impl WhereQb for UpdateQb {
    fn conditions_mut(&mut self) -> &mut ConditionTree {
        &mut self.conditions
    }
}

impl SqlQb for UpdateQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn validate(&self) -> QbResult<()> {
        if let Some(ref err) = self.build_error {
            return Err(err.clone());
        }
        if self.assignments.is_empty() {
            return Err(QbError::EmptySet {
                statement: "UPDATE",
                table: self.table.clone(),
            });
        }
        Ok(())
    }

    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String> {
        let set_parts: Vec<String> = self
            .assignments
            .iter()
            .map(|(col, value)| format!("{} = {}", col, seq.next(value.clone())))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, set_parts.join(", "));

        // SET placeholders come first, WHERE continues the numbering
        sql.push_str(&self.conditions.compile(seq, &self.config)?);

        if !self.returning_cols.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning_cols.join(", "));
        }

        Ok(sql)
    }
}
