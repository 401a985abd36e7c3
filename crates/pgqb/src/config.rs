//! Builder policies.

/// How identifiers outside the allow-list are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentPolicy {
    /// Silently drop disallowed characters (default).
    #[default]
    Strip,
    /// Report identifiers that would be altered by filtering.
    Reject,
}

/// How comparators outside the enumerated set are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparatorPolicy {
    /// Pass the character-filtered comparator through as-is (default).
    #[default]
    Lenient,
    /// Report comparators that are not one of `=, !=, >, <, >=, <=, IN, NOT IN, LIKE, NOT LIKE`.
    Strict,
}

/// Configuration shared by all statement builders created from one [`crate::Table`].
///
/// The defaults match the historical lenient behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QbConfig {
    /// Identifier handling.
    pub ident_policy: IdentPolicy,
    /// Comparator handling.
    pub comparator_policy: ComparatorPolicy,
}

impl QbConfig {
    /// Create a new configuration with defaults (strip identifiers, lenient comparators).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that rejects instead of rewriting anything.
    pub fn strict() -> Self {
        Self {
            ident_policy: IdentPolicy::Reject,
            comparator_policy: ComparatorPolicy::Strict,
        }
    }

    /// Set the identifier policy.
    pub fn with_ident_policy(mut self, policy: IdentPolicy) -> Self {
        self.ident_policy = policy;
        self
    }

    /// Set the comparator policy.
    pub fn with_comparator_policy(mut self, policy: ComparatorPolicy) -> Self {
        self.comparator_policy = policy;
        self
    }
}
