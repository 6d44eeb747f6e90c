//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// The kinds of entity tracked by the store.
///
/// Carried by [`DomainError::NotFound`] so callers can tell which lookup failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Inventory,
    Transfer,
    Transaction,
    Contract,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Inventory => "inventory item",
            EntityKind::Transfer => "transfer",
            EntityKind::Transaction => "transaction",
            EntityKind::Contract => "smart contract",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One offending field in a rejected payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). None of these are worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A payload failed structural validation.
    #[error("validation failed: {}", describe_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// A lookup by id found nothing.
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// An outgoing transfer would drive stock below zero.
    #[error("insufficient quantity for item {item_id} (available: {available}, requested: {requested})")]
    InsufficientQuantity {
        item_id: String,
        available: u64,
        requested: u64,
    },

    /// A status change is not allowed from the current state.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid or already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not be reached (e.g. lock poisoning).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

fn describe_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    /// Single-field validation failure.
    pub fn validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, msg)])
    }

    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound(kind)
    }

    pub fn invalid_transition(from: impl core::fmt::Display, to: impl core::fmt::Display) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Accumulates field violations so a payload reports every problem at once.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.violations.push(FieldViolation::new(field, message));
        }
        self
    }

    pub fn require_non_blank(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be empty")
    }

    pub fn finish(&mut self) -> DomainResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(core::mem::take(&mut self.violations)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_collects_every_violation() {
        let err = Validator::new()
            .require_non_blank("name", "  ")
            .check(false, "quantity", "must be positive")
            .check(true, "status", "unused")
            .finish()
            .unwrap_err();

        match err {
            DomainError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["name", "quantity"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validator_passes_clean_payload() {
        assert!(Validator::new().require_non_blank("name", "Widget").finish().is_ok());
    }

    #[test]
    fn messages_name_the_entity_kind() {
        assert_eq!(
            DomainError::not_found(EntityKind::Transfer).to_string(),
            "transfer not found"
        );
        assert_eq!(
            DomainError::invalid_transition("completed", "completed").to_string(),
            "invalid transition from completed to completed"
        );
    }
}
