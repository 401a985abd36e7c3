//! Trait definitions for query builders.

use crate::error::QbResult;
use crate::qb::comparator::Comparator;
use crate::qb::expr::{Condition, ConditionTree, Entry};
use crate::qb::param::ValueSequencer;
use crate::value::{Operand, Value};
use serde::Serialize;
use std::fmt;
use tokio_postgres::types::ToSql;

/// Kind of statement a builder renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementKind {
    Select,
    Count,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatementKind::Select => "SELECT",
            StatementKind::Count => "COUNT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// The result of rendering a statement.
///
/// `values[i]` is bound to placeholder `$<i + 1>` in `query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    pub query: String,
    pub values: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(query: String, values: Vec<Value>) -> Self {
        Self { query, values }
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    /// Split into the SQL text and its values.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.query, self.values)
    }
}

/// Base trait for all statement builders.
pub trait SqlQb {
    /// Which statement this builder renders.
    fn kind(&self) -> StatementKind;

    /// Render the SQL text, binding values into `seq` in placeholder order.
    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String>;

    /// Validate builder state before rendering.
    fn validate(&self) -> QbResult<()> {
        Ok(())
    }

    /// Render the statement into `{query, values}`.
    ///
    /// Every call starts a fresh [`ValueSequencer`], so rendering is repeatable.
    fn get(&self) -> QbResult<BuiltQuery> {
        self.validate()?;
        let mut seq = ValueSequencer::new();
        let query = self.build(&mut seq)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgqb.sql",
            kind = %self.kind(),
            param_count = seq.len(),
            sql = %query,
            "rendered statement"
        );

        Ok(BuiltQuery::new(query, seq.into_values()))
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> QbResult<String> {
        self.get().map(|built| built.query)
    }
}

/// WHERE-clause methods shared by SELECT, COUNT, UPDATE and DELETE.
pub trait WhereQb: Sized {
    /// The builder's condition tree.
    fn conditions_mut(&mut self) -> &mut ConditionTree;

    /// Add a top-level entry (condition or AND/OR group).
    fn entry(mut self, entry: impl Into<Entry>) -> Self {
        self.conditions_mut().push(entry);
        self
    }

    /// Add WHERE: field = value
    fn filter(self, field: &str, value: impl Into<Operand>) -> Self {
        self.entry(Condition::new(field, value))
    }

    /// Add WHERE: field comparator value
    fn filter_op(
        self,
        field: &str,
        value: impl Into<Operand>,
        comparator: impl Into<Comparator>,
    ) -> Self {
        self.entry(Condition::new(field, value).op(comparator))
    }

    /// Add WHERE: LOWER(field) comparator LOWER(value)
    fn filter_ci(
        self,
        field: &str,
        value: impl Into<Operand>,
        comparator: impl Into<Comparator>,
    ) -> Self {
        self.entry(Condition::new(field, value).op(comparator).ignore_case())
    }

    /// Add WHERE: field = value
    fn eq(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Eq)
    }

    /// Add WHERE: field != value
    fn ne(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Ne)
    }

    /// Add WHERE: field > value
    fn gt(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Gt)
    }

    /// Add WHERE: field >= value
    fn gte(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Gte)
    }

    /// Add WHERE: field < value
    fn lt(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Lt)
    }

    /// Add WHERE: field <= value
    fn lte(self, field: &str, value: impl Into<Operand>) -> Self {
        self.filter_op(field, value, Comparator::Lte)
    }

    /// Add WHERE: field LIKE pattern
    fn like(self, field: &str, pattern: impl Into<Operand>) -> Self {
        self.filter_op(field, pattern, Comparator::Like)
    }

    /// Add WHERE: field NOT LIKE pattern
    fn not_like(self, field: &str, pattern: impl Into<Operand>) -> Self {
        self.filter_op(field, pattern, Comparator::NotLike)
    }

    /// Add WHERE: field IN (values...). Empty lists render `FALSE`.
    fn in_list(self, field: &str, values: impl Into<Operand>) -> Self {
        self.filter_op(field, values, Comparator::In)
    }

    /// Add WHERE: field NOT IN (values...). Empty lists render `TRUE`.
    fn not_in(self, field: &str, values: impl Into<Operand>) -> Self {
        self.filter_op(field, values, Comparator::NotIn)
    }

    /// Add WHERE: field IS NULL
    fn is_null(self, field: &str) -> Self {
        self.filter_op(field, Value::Null, Comparator::Eq)
    }

    /// Add WHERE: field IS NOT NULL
    fn is_not_null(self, field: &str) -> Self {
        self.filter_op(field, Value::Null, Comparator::Ne)
    }

    /// Add an OR group of `entries`, ANDed with the other top-level entries.
    fn or<I>(self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        self.entry(crate::qb::expr::or(entries))
    }

    /// Add an AND group of `entries`.
    fn and<I>(self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry>,
    {
        self.entry(crate::qb::expr::and(entries))
    }
}
