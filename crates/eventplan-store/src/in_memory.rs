//! In-memory repositories.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_core::aggregate::AggregateRoot;
use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository};
use eventplan_game::domain::aggregates::Game;
use eventplan_game::domain::repository::GameRepository;
use tracing::debug;
use uuid::Uuid;

fn poisoned<E: std::fmt::Display>(e: E) -> DomainError {
    DomainError::Infrastructure(format!("repository lock poisoned: {e}"))
}

/// A map-backed repository for any catalog entity.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    entries: RwLock<HashMap<Uuid, T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, T>>, DomainError> {
        self.entries.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, T>>, DomainError> {
        self.entries.write().map_err(poisoned)
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, DomainError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn save(&self, entity: T) -> Result<T, DomainError> {
        debug!(kind = T::KIND, id = %entity.id(), "saving catalog entry");
        self.write()?.insert(entity.id(), entity.clone());
        Ok(entity)
    }
}

/// A fresh, empty in-memory repository for every catalog kind.
#[must_use]
pub fn in_memory_catalog() -> CatalogRepositories {
    CatalogRepositories {
        briefs: Arc::new(InMemoryRepository::new()),
        venues: Arc::new(InMemoryRepository::new()),
        concepts: Arc::new(InMemoryRepository::new()),
        constraints: Arc::new(InMemoryRepository::new()),
        entertainments: Arc::new(InMemoryRepository::new()),
        caterings: Arc::new(InMemoryRepository::new()),
        issues: Arc::new(InMemoryRepository::new()),
    }
}

/// A map-backed, version-checked game repository.
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<Uuid, Game>>,
}

impl InMemoryGameRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Game>, DomainError> {
        Ok(self.games.read().map_err(poisoned)?.values().cloned().collect())
    }

    async fn find_active_by_player_id(
        &self,
        player_id: Uuid,
    ) -> Result<Option<Game>, DomainError> {
        let games = self.games.read().map_err(poisoned)?;
        Ok(games
            .values()
            .filter(|game| game.player_id() == player_id && !game.is_completed())
            .max_by_key(|game| game.updated_at())
            .cloned())
    }

    async fn save(&self, game: &Game) -> Result<Game, DomainError> {
        let mut games = self.games.write().map_err(poisoned)?;
        let actual = games.get(&game.id()).map_or(0, AggregateRoot::version);
        if actual != game.version() {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id: game.id(),
                expected: game.version(),
                actual,
            });
        }
        let saved = game.clone().with_version(actual + 1);
        games.insert(saved.id(), saved.clone());
        debug!(game_id = %saved.id(), version = saved.version(), "game saved");
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.games.write().map_err(poisoned)?.remove(&id).is_some())
    }
}
