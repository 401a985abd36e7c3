//! Condition trees for WHERE clauses.
//!
//! A [`ConditionTree`] is an ordered list of [`Entry`] nodes that are implicitly ANDed
//! together. Each entry is either a leaf [`Condition`] or an AND/OR group of further
//! entries, nested to any depth.
//!
//! Compiling walks the tree depth-first, left to right, drawing placeholders from a
//! shared [`ValueSequencer`], so placeholder numbers follow the textual order of the
//! rendered SQL. Groups are always parenthesized, even with a single child, which
//! keeps any nesting composable:
//!
//! ```ignore
//! use pgqb::{and, condition, or};
//!
//! // WHERE ((first_name = $1 AND last_name = $2) OR (first_name = $3 AND last_name = $4))
//! let entry = or([
//!     and([condition("first_name", "john"), condition("last_name", "doe")]),
//!     and([condition("first_name", "jona"), condition("last_name", "dona")]),
//! ]);
//! ```
//!
//! Special cases never consume a placeholder:
//! - list operand that is empty after dropping NULLs: `FALSE`, or `TRUE` for `NOT IN`
//! - NULL operand: `field IS NULL` for `=`, `field IS NOT NULL` for `!=`, `FALSE` otherwise

use crate::config::{ComparatorPolicy, IdentPolicy, QbConfig};
use crate::error::{QbError, QbResult};
use crate::ident::{self, IdentKind};
use crate::qb::comparator::Comparator;
use crate::qb::param::ValueSequencer;
use crate::value::{Operand, Value};

/// A single `field comparator value` comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    field: String,
    comparator: Comparator,
    value: Operand,
    ignore_case: bool,
    /// Caller's field name, kept only when sanitizing altered it.
    unsanitized: Option<String>,
}

impl Condition {
    /// Create an equality condition. The field name is sanitized immediately.
    pub fn new(field: &str, value: impl Into<Operand>) -> Self {
        let cleaned = ident::clean_ident(field);
        let unsanitized = ident::sanitize(field, IdentKind::Field, IdentPolicy::Reject)
            .is_err()
            .then(|| field.to_string());
        Self {
            field: cleaned,
            comparator: Comparator::Eq,
            value: value.into(),
            ignore_case: false,
            unsanitized,
        }
    }

    /// Set the comparator (`"="`, `">"`, `"IN"`, ... or a [`Comparator`]).
    pub fn op(mut self, comparator: impl Into<Comparator>) -> Self {
        self.comparator = comparator.into();
        self
    }

    /// Compare case-insensitively: `LOWER(field) op LOWER($n)`.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Set the ignore-case flag explicitly.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// The sanitized field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// The right-hand side, a scalar or a list.
    pub fn value(&self) -> &Operand {
        &self.value
    }

    /// Whether both sides are wrapped in `LOWER`.
    pub fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    fn lowered(&self, sql: String) -> String {
        if self.ignore_case {
            format!("LOWER({})", sql)
        } else {
            sql
        }
    }

    fn check(&self, config: &QbConfig) -> QbResult<()> {
        if config.ident_policy == IdentPolicy::Reject {
            if let Some(raw) = &self.unsanitized {
                return Err(QbError::InvalidIdentifier(raw.clone()));
            }
        }
        if let Comparator::Other(op) = &self.comparator {
            match config.comparator_policy {
                ComparatorPolicy::Strict => return Err(QbError::UnknownComparator(op.clone())),
                ComparatorPolicy::Lenient => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "pgqb.sql",
                        field = %self.field,
                        comparator = %op,
                        "passing through unrecognized comparator"
                    );
                }
            }
        }
        Ok(())
    }

    /// Render this condition, binding its values into `seq`.
    pub fn compile(&self, seq: &mut ValueSequencer, config: &QbConfig) -> QbResult<String> {
        self.check(config)?;

        let value_sql = match &self.value {
            Operand::List(items) => {
                let items: Vec<&Value> = items.iter().filter(|v| !v.is_null()).collect();
                if items.is_empty() {
                    let constant = match self.comparator {
                        Comparator::NotIn => "TRUE",
                        _ => "FALSE",
                    };
                    return Ok(constant.to_string());
                }
                let tokens: Vec<String> = items
                    .into_iter()
                    .map(|v| {
                        let token = seq.next(v.clone());
                        self.lowered(token)
                    })
                    .collect();
                format!("({})", tokens.join(","))
            }
            Operand::Scalar(Value::Null) => {
                return Ok(match self.comparator {
                    Comparator::Eq => format!("{} IS NULL", self.field),
                    Comparator::Ne => format!("{} IS NOT NULL", self.field),
                    _ => "FALSE".to_string(),
                });
            }
            Operand::Scalar(v) => {
                let token = seq.next(v.clone());
                self.lowered(token)
            }
        };

        Ok(format!(
            "{} {} {}",
            self.lowered(self.field.clone()),
            self.comparator,
            value_sql
        ))
    }
}

/// A node of a condition tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// Leaf comparison.
    Condition(Condition),
    /// All children must hold. Must not be empty.
    And(Vec<Entry>),
    /// At least one child must hold. Must not be empty.
    Or(Vec<Entry>),
}

impl Entry {
    /// Render this entry, binding its values into `seq`.
    ///
    /// Fails with [`QbError::MalformedEntry`] for an AND/OR group without children.
    pub fn compile(&self, seq: &mut ValueSequencer, config: &QbConfig) -> QbResult<String> {
        match self {
            Entry::Condition(cond) => cond.compile(seq, config),
            Entry::And(children) => compile_group(children, " AND ", "AND", seq, config),
            Entry::Or(children) => compile_group(children, " OR ", "OR", seq, config),
        }
    }
}

fn compile_group(
    children: &[Entry],
    sep: &str,
    name: &str,
    seq: &mut ValueSequencer,
    config: &QbConfig,
) -> QbResult<String> {
    if children.is_empty() {
        return Err(QbError::malformed(format!("{name} group has no entries")));
    }
    let parts = children
        .iter()
        .map(|child| child.compile(seq, config))
        .collect::<QbResult<Vec<_>>>()?;
    Ok(format!("({})", parts.join(sep)))
}

impl From<Condition> for Entry {
    fn from(cond: Condition) -> Self {
        Entry::Condition(cond)
    }
}

/// The WHERE clause of one statement: top-level entries joined with AND.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionTree {
    entries: Vec<Entry>,
}

impl ConditionTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Append a top-level entry.
    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    /// Get all top-level entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Render `" WHERE ..."`, or an empty string when there are no entries.
    pub fn compile(&self, seq: &mut ValueSequencer, config: &QbConfig) -> QbResult<String> {
        if self.entries.is_empty() {
            return Ok(String::new());
        }
        let parts = self
            .entries
            .iter()
            .map(|entry| entry.compile(seq, config))
            .collect::<QbResult<Vec<_>>>()?;
        Ok(format!(" WHERE {}", parts.join(" AND ")))
    }
}

/// Create an equality condition on `field`.
///
/// Chain [`Condition::op`] and [`Condition::ignore_case`] to change the comparison.
pub fn condition(field: &str, value: impl Into<Operand>) -> Condition {
    Condition::new(field, value)
}

/// Group entries so that all of them must hold.
pub fn and<I>(entries: I) -> Entry
where
    I: IntoIterator,
    I::Item: Into<Entry>,
{
    Entry::And(entries.into_iter().map(Into::into).collect())
}

/// Group entries so that at least one of them must hold.
pub fn or<I>(entries: I) -> Entry
where
    I: IntoIterator,
    I::Item: Into<Entry>,
{
    Entry::Or(entries.into_iter().map(Into::into).collect())
}
