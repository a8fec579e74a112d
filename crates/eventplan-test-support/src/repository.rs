//! Test repositories: mock `Repository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository};
use uuid::Uuid;

/// A repository preloaded with a fixed set of entities that records every
/// `save` call. Saved entities become visible to later lookups.
#[derive(Debug)]
pub struct RecordingRepository<T> {
    entities: Mutex<Vec<T>>,
    saved: Mutex<Vec<T>>,
}

impl<T: Entity> RecordingRepository<T> {
    /// Create a repository that initially holds `entities`.
    #[must_use]
    pub fn new(entities: Vec<T>) -> Self {
        Self {
            entities: Mutex::new(entities),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Create a repository with no entities.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns a snapshot of every entity passed to `save`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for RecordingRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError> {
        Ok(self
            .entities
            .lock()
            .unwrap()
            .iter()
            .find(|entity| entity.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, DomainError> {
        Ok(self.entities.lock().unwrap().clone())
    }

    async fn save(&self, entity: T) -> Result<T, DomainError> {
        let mut entities = self.entities.lock().unwrap();
        entities.retain(|existing| existing.id() != entity.id());
        entities.push(entity.clone());
        self.saved.lock().unwrap().push(entity.clone());
        Ok(entity)
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRepository;

#[async_trait]
impl<T: Entity> Repository<T> for FailingRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<T>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<T>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _entity: T) -> Result<T, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
