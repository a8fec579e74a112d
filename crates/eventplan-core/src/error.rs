//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Every failure is a deterministic logic error; none of them is retried.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input or an out-of-range field.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced game or catalog entry does not exist.
    #[error("{kind} with id {id} not found")]
    NotFound {
        /// Human-readable entity kind, e.g. `"Venue"`.
        kind: &'static str,
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// An ordering precondition is unmet or a count limit is exceeded.
    #[error("prerequisite error: {0}")]
    Prerequisite(String),

    /// The operation would drive the current budget below zero.
    #[error("budget error: {0}")]
    Budget(String),

    /// The game is in a terminal or conflicting state for this operation.
    #[error("state error: {0}")]
    State(String),

    /// Optimistic concurrency conflict.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Builds a `NotFound` error for the given entity kind.
    #[must_use]
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    /// Builds a `Budget` error in the canonical `Cost: …, Available: …` form.
    #[must_use]
    pub fn insufficient_budget(action: &str, cost: i64, available: i64) -> Self {
        Self::Budget(format!(
            "Not enough budget to {action}. Cost: {cost}, Available: {available}"
        ))
    }
}
