//! SQL identifier sanitizing.
//!
//! Identifiers (table, column and ORDER BY names) can't be bound as parameters, so
//! they are filtered against a character allow-list before they reach the SQL text:
//!
//! - fields and columns keep `[A-Za-z0-9$_]`
//! - table names and ORDER BY lists additionally keep `,` and space, so
//!   `"id DESC"` or `"a, b"` survive intact
//!
//! This is a blunt boundary filter, not a full identifier grammar. Under
//! [`IdentPolicy::Reject`] an identifier that the filter would alter is reported
//! instead of being silently rewritten.
//!
//! # Example
//! ```ignore
//! use pgqb::ident::{clean_ident, quote_column};
//!
//! assert_eq!(clean_ident("name; DROP TABLE users"), "nameDROPTABLEusers");
//! assert_eq!(quote_column("email"), r#""email""#);
//! ```

use crate::config::IdentPolicy;
use crate::error::{QbError, QbResult};

/// Which allow-list an identifier is filtered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    /// A single column or field name: `[A-Za-z0-9$_]`.
    Field,
    /// A table name or comma separated list: `[A-Za-z0-9$_, ]`.
    List,
}

impl IdentKind {
    fn allows(self, c: char) -> bool {
        let base = c.is_ascii_alphanumeric() || c == '$' || c == '_';
        match self {
            IdentKind::Field => base,
            IdentKind::List => base || c == ',' || c == ' ',
        }
    }
}

/// Strip every character outside `[A-Za-z0-9$_]`.
pub fn clean_ident(raw: &str) -> String {
    raw.chars().filter(|&c| IdentKind::Field.allows(c)).collect()
}

/// Strip every character outside `[A-Za-z0-9$_, ]`.
pub fn clean_list(raw: &str) -> String {
    raw.chars().filter(|&c| IdentKind::List.allows(c)).collect()
}

/// Wrap a column name in double quotes. `*` is passed through unquoted.
pub fn quote_column(column: &str) -> String {
    if column == "*" {
        return "*".to_string();
    }
    let mut out = String::with_capacity(column.len() + 2);
    out.push('"');
    out.push_str(column);
    out.push('"');
    out
}

/// Filter `raw` for `kind` under `policy`.
///
/// `Strip` always succeeds. `Reject` fails when filtering would change the input
/// or leave nothing behind.
pub fn sanitize(raw: &str, kind: IdentKind, policy: IdentPolicy) -> QbResult<String> {
    let cleaned: String = raw.chars().filter(|&c| kind.allows(c)).collect();
    match policy {
        IdentPolicy::Strip => Ok(cleaned),
        IdentPolicy::Reject if cleaned.is_empty() || cleaned.len() != raw.len() => {
            Err(QbError::InvalidIdentifier(raw.to_string()))
        }
        IdentPolicy::Reject => Ok(cleaned),
    }
}

/// Sanitize `raw`, recording the first failure in `slot` instead of returning it.
///
/// Builders are chained by value, so construction errors are deferred and surfaced
/// when the statement is rendered. The stripped form is returned either way.
pub(crate) fn sanitize_deferred(
    raw: &str,
    kind: IdentKind,
    policy: IdentPolicy,
    slot: &mut Option<QbError>,
) -> String {
    match sanitize(raw, kind, policy) {
        Ok(cleaned) => cleaned,
        Err(err) => {
            slot.get_or_insert(err);
            raw.chars().filter(|&c| kind.allows(c)).collect()
        }
    }
}
