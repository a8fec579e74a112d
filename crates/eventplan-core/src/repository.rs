//! Repository abstraction for catalog entities.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// An immutable, identifiable catalog entity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind used in `NotFound` errors and logs.
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Uuid;
}

/// CRUD-style repository port for a single entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Load an entity by id, returning `None` when it does not exist.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError>;

    /// Load every entity of this type.
    async fn find_all(&self) -> Result<Vec<T>, DomainError>;

    /// Insert or replace an entity, returning the stored value.
    async fn save(&self, entity: T) -> Result<T, DomainError>;
}

/// Loads an entity by id, turning a miss into `DomainError::NotFound`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the id is unknown, or whatever the
/// repository itself fails with.
pub async fn require<T: Entity>(repo: &dyn Repository<T>, id: Uuid) -> Result<T, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(T::KIND, id))
}
