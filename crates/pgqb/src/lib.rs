//! # pgqb
//!
//! A parameterized SQL statement builder for Postgres.
//!
//! ## Features
//!
//! - **Values are always bound**: every user value becomes a `$N` placeholder, never
//!   inline SQL text
//! - **Nested conditions**: AND/OR groups of any depth, numbered depth first
//! - **Identifier sanitizing**: table, column and ORDER BY names are filtered
//!   against an allow-list (or rejected, see [`IdentPolicy`])
//! - **Safe defaults**: DELETE requires a condition; INSERT/UPDATE require a column
//! - **tokio-postgres ready**: [`Value`] implements `ToSql`, so a [`BuiltQuery`] can
//!   be executed as is
//!
//! ## Query Builder (qb)
//!
//! ```
//! use pgqb::prelude::*;
//!
//! // SELECT
//! let built = table("users")
//!     .select()
//!     .filter("status", "active")
//!     .or([condition("role", "admin"), condition("role", "owner")])
//!     .order_by(&["created_at DESC"])
//!     .limit(10)
//!     .get()?;
//! assert_eq!(
//!     built.query,
//!     "SELECT * FROM users WHERE status = $1 AND (role = $2 OR role = $3) ORDER BY created_at DESC LIMIT $4"
//! );
//!
//! // INSERT
//! let built = table("users")
//!     .insert()
//!     .set("username", "alice")
//!     .set("email", "alice@example.com")
//!     .returning(&["id"])
//!     .get()?;
//! assert_eq!(
//!     built.query,
//!     "INSERT INTO users (username,email) VALUES ($1,$2) RETURNING id"
//! );
//!
//! // UPDATE
//! let built = table("users")
//!     .update()
//!     .set("status", "inactive")
//!     .eq("id", 7)
//!     .get()?;
//! assert_eq!(built.query, "UPDATE users SET status = $1 WHERE id = $2");
//!
//! // DELETE
//! let built = table("users").delete().eq("id", 7).get()?;
//! assert_eq!(built.query, "DELETE FROM users WHERE id = $1");
//! # Ok::<(), pgqb::QbError>(())
//! ```
//!
//! Executing a rendered statement with tokio-postgres:
//!
//! ```ignore
//! let built = table("users").select().eq("id", 7).get()?;
//! let rows = client.query(&built.query, &built.params_ref()).await?;
//! ```

pub mod config;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod qb;
pub mod value;

pub use config::{ComparatorPolicy, IdentPolicy, QbConfig};
pub use error::{QbError, QbResult};
pub use value::{Operand, Value};

// Re-export qb module for easy access
pub use qb::{
    BuiltQuery, Comparator, Condition, ConditionTree, CountQb, DeleteQb, Entry, InsertQb,
    SelectQb, SqlQb, StatementKind, Table, UpdateQb, ValueSequencer, WhereQb, and, condition, or,
    table, table_with,
};
