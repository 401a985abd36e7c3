//! Comparison operators.

use std::fmt;

/// Characters that may appear in any recognized comparator.
const ALPHABET: &str = "=!<>INOTLKE ";

/// A condition's comparison operator.
///
/// Parsing from a string is lenient: characters outside the comparator alphabet are
/// stripped and anything that still doesn't match a known operator is kept as
/// [`Comparator::Other`] and rendered verbatim. Use
/// [`ComparatorPolicy::Strict`](crate::config::ComparatorPolicy::Strict) to refuse those.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Comparator {
    /// `=`
    #[default]
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// Filtered residue of an unrecognized comparator.
    Other(String),
}

impl Comparator {
    /// Parse a comparator, stripping characters outside the comparator alphabet.
    ///
    /// Keywords are matched case-insensitively (`"not in"` is `NOT IN`).
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| ALPHABET.contains(*c))
            .collect();
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        match cleaned.as_str() {
            "=" => Comparator::Eq,
            "!=" => Comparator::Ne,
            ">" => Comparator::Gt,
            "<" => Comparator::Lt,
            ">=" => Comparator::Gte,
            "<=" => Comparator::Lte,
            "IN" => Comparator::In,
            "NOT IN" => Comparator::NotIn,
            "LIKE" => Comparator::Like,
            "NOT LIKE" => Comparator::NotLike,
            other => Comparator::Other(other.to_string()),
        }
    }

    /// SQL text of the operator.
    pub fn as_str(&self) -> &str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Gte => ">=",
            Comparator::Lte => "<=",
            Comparator::In => "IN",
            Comparator::NotIn => "NOT IN",
            Comparator::Like => "LIKE",
            Comparator::NotLike => "NOT LIKE",
            Comparator::Other(s) => s,
        }
    }

    /// Returns `true` if this is one of the enumerated operators.
    pub fn is_known(&self) -> bool {
        !matches!(self, Comparator::Other(_))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Comparator {
    fn from(raw: &str) -> Self {
        Comparator::parse(raw)
    }
}

impl From<String> for Comparator {
    fn from(raw: String) -> Self {
        Comparator::parse(&raw)
    }
}
