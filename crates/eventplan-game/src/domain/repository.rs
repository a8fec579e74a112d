//! Persistence port for games.

use async_trait::async_trait;
use eventplan_core::error::DomainError;
use uuid::Uuid;

use super::aggregates::Game;

/// Storage for game snapshots.
///
/// `save` is version-checked: the stored version must equal the version of
/// the game passed in (or the game must be new with version 0). On success
/// the stored copy carries the next version and is returned.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Loads a game by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError>;

    /// Lists every stored game.
    async fn find_all(&self) -> Result<Vec<Game>, DomainError>;

    /// Finds a game for `player_id` that is not completed.
    async fn find_active_by_player_id(&self, player_id: Uuid)
    -> Result<Option<Game>, DomainError>;

    /// Inserts or replaces a game, returning it with its new version.
    ///
    /// Fails with `DomainError::ConcurrencyConflict` if the stored version
    /// moved on since `game` was loaded.
    async fn save(&self, game: &Game) -> Result<Game, DomainError>;

    /// Removes a game. Returns whether anything was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
