//! Error types for pgqb

use thiserror::Error;

/// Result type alias for pgqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised while rendering a statement.
///
/// Rendering is pure and deterministic, so none of these are retryable: they
/// either describe a guarded operation the caller must opt into explicitly or
/// a builder that was assembled incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// DELETE rendered via `get()` without any condition
    #[error(
        "Refusing to delete every row in `{table}`: no condition was given. \
         Use all() instead of get() if this is intended"
    )]
    UnguardedDelete { table: String },

    /// INSERT/UPDATE rendered without any column
    #[error("{statement} on `{table}` has no columns to write")]
    EmptySet {
        statement: &'static str,
        table: String,
    },

    /// Condition tree node violating its structural contract
    #[error("Malformed condition entry: {0}")]
    MalformedEntry(String),

    /// Identifier rejected under `IdentPolicy::Reject`
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Comparator rejected under `ComparatorPolicy::Strict`
    #[error("Unknown comparator: {0:?}")]
    UnknownComparator(String),

    /// Value that cannot be bound (e.g. `obj()` given a non-object)
    #[error("Validation error: {0}")]
    Validation(String),
}

impl QbError {
    /// Create a malformed entry error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEntry(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is the DELETE guard firing
    pub fn is_unguarded_delete(&self) -> bool {
        matches!(self, Self::UnguardedDelete { .. })
    }

    /// Check if this error comes from a caller-constructed entry or identifier
    /// rather than a guarded operation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MalformedEntry(_) | Self::InvalidIdentifier(_) | Self::UnknownComparator(_)
        )
    }
}

impl From<serde_json::Error> for QbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_guard_message_points_to_all() {
        let err = QbError::UnguardedDelete {
            table: "users".to_string(),
        };
        assert!(err.to_string().contains("all()"));
        assert!(err.is_unguarded_delete());
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn contract_violations() {
        assert!(QbError::malformed("empty OR group").is_contract_violation());
        assert!(QbError::UnknownComparator("ANDLIKE".into()).is_contract_violation());
        assert!(!QbError::validation("x").is_contract_violation());
    }
}
