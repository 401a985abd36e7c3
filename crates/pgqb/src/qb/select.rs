//! SELECT query builder.

use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::expr::ConditionTree;
use crate::qb::param::ValueSequencer;
use crate::qb::traits::{SqlQb, StatementKind, WhereQb};

/// SELECT query builder.
///
/// Renders `SELECT cols FROM table [WHERE ...] [ORDER BY ...] [LIMIT $n] [OFFSET $n]`.
#[derive(Clone, Debug)]
pub struct SelectQb {
    /// Sanitized table name
    table: String,
    /// Rendered column list (quoted, or `*`)
    columns: Vec<String>,
    /// WHERE conditions
    conditions: ConditionTree,
    /// Sanitized ORDER BY items
    order_clauses: Vec<String>,
    /// LIMIT
    limit: Option<i64>,
    /// OFFSET
    offset: Option<i64>,
    config: QbConfig,
    /// First deferred construction error
    build_error: Option<QbError>,
}

impl SelectQb {
    /// Create a new `SELECT *` builder for a table.
    pub fn new(table: &str) -> Self {
        Self::with_config(table, QbConfig::default())
    }

    /// Create a new `SELECT *` builder with explicit policies.
    pub fn with_config(table: &str, config: QbConfig) -> Self {
        let mut build_error = None;
        let table =
            ident::sanitize_deferred(table, IdentKind::List, config.ident_policy, &mut build_error);
        Self {
            table,
            columns: vec!["*".to_string()],
            conditions: ConditionTree::new(),
            order_clauses: Vec::new(),
            limit: None,
            offset: None,
            config,
            build_error,
        }
    }

    /// Set the column list. Each column is sanitized and quoted; `*` passes through.
    ///
    /// An empty slice keeps `SELECT *`.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        if cols.is_empty() {
            self.columns = vec!["*".to_string()];
            return self;
        }
        let policy = self.config.ident_policy;
        self.columns = cols
            .iter()
            .map(|col| {
                if *col == "*" {
                    return "*".to_string();
                }
                let cleaned =
                    ident::sanitize_deferred(col, IdentKind::Field, policy, &mut self.build_error);
                ident::quote_column(&cleaned)
            })
            .collect();
        self
    }

    /// Append ORDER BY items, e.g. `&["created_at DESC", "id"]`.
    pub fn order_by(mut self, items: &[&str]) -> Self {
        let policy = self.config.ident_policy;
        for item in items {
            let cleaned =
                ident::sanitize_deferred(item, IdentKind::List, policy, &mut self.build_error);
            self.order_clauses.push(cleaned);
        }
        self
    }

    /// Set LIMIT (bound as a parameter).
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET (bound as a parameter).
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: i64, per_page: i64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1).saturating_mul(size));
        self
    }

    /// Get the sanitized table name.
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl WhereQb for SelectQb {
    fn conditions_mut(&mut self) -> &mut ConditionTree {
        &mut self.conditions
    }
}

impl SqlQb for SelectQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn validate(&self) -> QbResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String> {
        let mut sql = format!("SELECT {} FROM {}", self.columns.join(","), self.table);

        sql.push_str(&self.conditions.compile(seq, &self.config)?);

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(","));
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&seq.next(limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&seq.next(offset));
        }

        Ok(sql)
    }
}
