//! Query builders and the condition-tree compiler.
//!
//! Every builder renders to a [`BuiltQuery`]: a SQL string with `$N` placeholders
//! and the values bound to them, in placeholder order. Values never appear inline
//! in the SQL text.
//!
//! # Features
//!
//! - **One sequencer per render**: placeholders are numbered while the tree is
//!   compiled, left to right and depth first, never by string replacement
//! - **Nested AND/OR groups**: built with the free [`and`] / [`or`] helpers
//! - **Shared filter API**: SELECT, COUNT, DELETE and UPDATE all implement [`WhereQb`]
//!
//! # Usage
//!
//! ```
//! use pgqb::qb::{self, condition, SqlQb, WhereQb};
//!
//! let built = qb::table("users")
//!     .select()
//!     .eq("id", 1)
//!     .or([condition("a", 1), condition("b", 2)])
//!     .get()
//!     .unwrap();
//! assert_eq!(built.query, "SELECT * FROM users WHERE id = $1 AND (a = $2 OR b = $3)");
//! assert_eq!(built.values.len(), 3);
//!
//! // DELETE without conditions is refused; all() is the explicit escape hatch
//! assert!(qb::table("users").delete().get().is_err());
//! assert_eq!(qb::table("users").delete().all().unwrap().query, "DELETE FROM users");
//! ```

mod assign;
mod comparator;
mod count;
mod delete;
mod expr;
mod insert;
mod param;
mod select;
mod traits;
mod update;

pub use comparator::Comparator;
pub use count::CountQb;
pub use delete::DeleteQb;
pub use expr::{Condition, ConditionTree, Entry, and, condition, or};
pub use insert::InsertQb;
pub use param::ValueSequencer;
pub use select::SelectQb;
pub use traits::{BuiltQuery, SqlQb, StatementKind, WhereQb};
pub use update::UpdateQb;

use crate::config::QbConfig;

/// Statement factory for one table.
///
/// Each call creates an independent builder; nothing is shared between them.
#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    config: QbConfig,
}

impl Table {
    /// Create a factory with default policies.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, QbConfig::default())
    }

    /// Create a factory whose builders use `config`.
    pub fn with_config(name: impl Into<String>, config: QbConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Raw (unsanitized) table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policies passed to every builder.
    pub fn config(&self) -> &QbConfig {
        &self.config
    }

    /// `SELECT * FROM table`. Narrow the column list with [`SelectQb::columns`].
    pub fn select(&self) -> SelectQb {
        SelectQb::with_config(&self.name, self.config)
    }

    /// `SELECT COUNT(*) FROM table`.
    pub fn count(&self) -> CountQb {
        CountQb::with_config(&self.name, self.config)
    }

    /// `DELETE FROM table`.
    ///
    /// # Safety
    /// Rendering with `get()` requires at least one condition. Use
    /// [`DeleteQb::all`] to delete every row.
    pub fn delete(&self) -> DeleteQb {
        DeleteQb::with_config(&self.name, self.config)
    }

    /// `INSERT INTO table`.
    pub fn insert(&self) -> InsertQb {
        InsertQb::with_config(&self.name, self.config)
    }

    /// `UPDATE table`.
    pub fn update(&self) -> UpdateQb {
        UpdateQb::with_config(&self.name, self.config)
    }
}

/// Create a statement factory for the given table.
///
/// # Example
/// ```
/// use pgqb::qb::{table, SqlQb};
///
/// let built = table("users").insert().set("id", 1).set("name", "john").get().unwrap();
/// assert_eq!(built.query, "INSERT INTO users (id,name) VALUES ($1,$2)");
/// ```
pub fn table(name: &str) -> Table {
    Table::new(name)
}

/// Create a statement factory with explicit sanitization and comparator policies.
///
/// # Example
/// ```
/// use pgqb::{QbConfig, qb::{table_with, SqlQb, WhereQb}};
///
/// let err = table_with("users", QbConfig::strict())
///     .select()
///     .filter_op("name", "j%", "ILIKE")
///     .get()
///     .unwrap_err();
/// assert!(err.is_contract_violation());
/// ```
pub fn table_with(name: &str, config: QbConfig) -> Table {
    Table::with_config(name, config)
}
