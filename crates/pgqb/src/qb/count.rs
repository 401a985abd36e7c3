//! COUNT query builder.

use crate::config::QbConfig;
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::expr::ConditionTree;
use crate::qb::param::ValueSequencer;
use crate::qb::traits::{SqlQb, StatementKind, WhereQb};

/// `SELECT COUNT(*) FROM table [WHERE ...]`
#[derive(Clone, Debug)]
pub struct CountQb {
    table: String,
    conditions: ConditionTree,
    config: QbConfig,
    build_error: Option<QbError>,
}

impl CountQb {
    /// Create a new COUNT builder.
    pub fn new(table: &str) -> Self {
        Self::with_config(table, QbConfig::default())
    }

    /// Create a new COUNT builder with explicit policies.
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
}

impl WhereQb for CountQb {
    fn conditions_mut(&mut self) -> &mut ConditionTree {
        &mut self.conditions
    }
}

impl SqlQb for CountQb {
    fn kind(&self) -> StatementKind {
        StatementKind::Count
    }

    fn validate(&self) -> QbResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn build(&self, seq: &mut ValueSequencer) -> QbResult<String> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        sql.push_str(&self.conditions.compile(seq, &self.config)?);
        Ok(sql)
    }
}
