//! DELETE query builder.

use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::expr::ConditionTree;
use crate::qb::param::ValueSequencer;
use crate::qb::traits::{BuiltQuery, SqlQb, StatementKind, WhereQb};

/// DELETE query builder.
///
/// # Safety
/// `get()` refuses to render a DELETE without conditions and returns
/// [`QbError::UnguardedDelete`]. Deleting every row requires the explicit
/// [`DeleteQb::all`].
#[derive(Clone, Debug)]
pub struct DeleteQb {
    table: String,
    conditions: ConditionTree,
    config: QbConfig,
    build_error: Option<QbError>,
}

impl DeleteQb {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self::with_config(table, QbConfig::default())
    }

    /// Create a new DELETE builder with explicit policies.
    pub fn with_config(table: &str, config: QbConfig) -> Self {
        let mut build_error = None;
        let table =
            ident::sanitize_deferred(table, IdentKind::List, config.ident_policy, &mut build_error);
        Self {
            table,
            conditions: ConditionTree::new(),
            config,
            build_error,
        }
    }

    /// Render `DELETE FROM table`, ignoring any conditions.
    pub fn all(&self) -> QbResult<BuiltQuery> {
        self.validate()?;
        Ok(BuiltQuery::new(format!("DELETE FROM {}", self.table), Vec::new()))
    }
}

impl WhereQb for DeleteQb {
    fn conditions_mut(&mut self) -> &mut ConditionTree {
        &mut self.conditions
    }
}

impl SqlQb for DeleteQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn validate(&self) -> QbResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String> {
        if self.conditions.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "pgqb.sql",
                table = %self.table,
                "refusing DELETE without conditions"
            );
            return Err(QbError::UnguardedDelete {
                table: self.table.clone(),
            });
        }

        let mut sql = format!("DELETE FROM {}", self.table);
        sql.push_str(&self.conditions.compile(seq, &self.config)?);
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::expr::{and, condition};
    use crate::value::Value;

    #[test]
    fn test_simple_delete() {
        let built = DeleteQb::new("users").eq("id", 42i64).get().unwrap();
        assert_eq!(built.query, "DELETE FROM users WHERE id = $1");
        assert_eq!(built.values, vec![Value::Int(42)]);
    }

    #[test]
    fn test_delete_without_where_fails() {
        let err = DeleteQb::new("users").get().unwrap_err();
        assert_eq!(
            err,
            QbError::UnguardedDelete {
                table: "users".into()
            }
        );
    }

    #[test]
    fn test_delete_all() {
        let built = DeleteQb::new("users").all().unwrap();
        assert_eq!(built.query, "DELETE FROM users");
        assert!(built.values.is_empty());
    }

    #[test]
    fn test_delete_all_ignores_conditions() {
        let built = DeleteQb::new("users").eq("id", 1i64).all().unwrap();
        assert_eq!(built.query, "DELETE FROM users");
        assert!(built.values.is_empty());
    }

    #[test]
    fn test_delete_ignore_case() {
        let sql = DeleteQb::new("users")
            .filter_ci("id", 1i32, "=")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE LOWER(id) = LOWER($1)");
    }

    #[test]
    fn test_delete_nested_single() {
        let built = DeleteQb::new("users")
            .or([and([condition("id", 1i32)])])
            .get()
            .unwrap();
        assert_eq!(built.query, "DELETE FROM users WHERE ((id = $1))");
        assert_eq!(built.values, vec![Value::Int(1)]);
    }

    #[test]
    fn test_delete_with_in() {
        let sql = DeleteQb::new("users")
            .in_list("id", vec![1i64, 2, 3])
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE id IN ($1,$2,$3)");
    }
}
