//! INSERT query builder.

use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::assign::Assignments;
use crate::qb::param::ValueSequencer;
use crate::qb::traits::{SqlQb, StatementKind};
use crate::value::Value;
use serde::Serialize;

/// INSERT query builder.
///
/// Renders `INSERT INTO table (c1,c2) VALUES ($1,$2) [RETURNING c1, c2]`. Every value,
/// NULL included, is bound as a parameter.
#[derive(Clone, Debug)]
pub struct InsertQb {
    /// Table name
    table: String,
    /// Column values
    assignments: Assignments,
    /// RETURNING columns
    returning_cols: Vec<String>,
    config: QbConfig,
    build_error: Option<QbError>,
}

impl InsertQb {
    /// Create a new INSERT builder.
    pub fn new(table: &str) -> Self {
        Self::with_config(table, QbConfig::default())
    }

    /// Create a new INSERT builder with explicit policies.
    pub fn with_config(table: &str, config: QbConfig) -> Self {
        let mut build_error = None;
        let table =
            ident::sanitize_deferred(table, IdentKind::List, config.ident_policy, &mut build_error);
        Self {
            table,
            assignments: Assignments::new(),
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

impl SqlQb for InsertQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn validate(&self) -> QbResult<()> {
        if let Some(ref err) = self.build_error {
            return Err(err.clone());
        }
        if self.assignments.is_empty() {
            return Err(QbError::EmptySet {
                statement: "INSERT",
                table: self.table.clone(),
            });
        }
        Ok(())
    }

    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String> {
        let columns: Vec<&str> = self.assignments.columns().collect();
        let placeholders: Vec<String> = self
            .assignments
            .iter()
            .map(|(_, value)| seq.next(value.clone()))
            .collect();

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(","),
            placeholders.join(",")
        );

        if !self.returning_cols.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning_cols.join(", "));
        }

        Ok(sql)
    }
}
