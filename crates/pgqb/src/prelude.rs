//! Convenient imports for typical `pgqb` usage.
//!
//! ```ignore
//! use pgqb::prelude::*;
//! ```

pub use crate::{
    BuiltQuery, QbConfig, QbError, QbResult, SqlQb, Value, WhereQb, and, condition, or, table,
    table_with,
};
