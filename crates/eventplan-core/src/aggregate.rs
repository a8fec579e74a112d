//! Aggregate root abstraction.

use uuid::Uuid;

/// Trait for aggregate roots persisted as versioned snapshots.
///
/// The version is bumped by the repository on every successful save and is
/// used to reject writes made from a stale snapshot.
pub trait AggregateRoot: Send + Sync {
    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the version of the snapshot this value was loaded from.
    fn version(&self) -> i64;
}
