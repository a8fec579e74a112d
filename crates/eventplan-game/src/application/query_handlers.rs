//! Query handlers for the Game context.
//!
//! Read-only lookups returning serializable views.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use eventplan_catalog::domain::entities::UnexpectedIssue;
use eventplan_core::aggregate::AggregateRoot;
use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository};
use eventplan_core::rng::DeterministicRng;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers::GAME_KIND;
use crate::domain::aggregates::{FinalStrategyType, Game, MAX_RESOLVED_ISSUES};
use crate::domain::repository::GameRepository;

/// Read-only view of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// The game identifier.
    pub id: Uuid,
    /// The owning player.
    pub player_id: Uuid,
    /// When the game was initialized.
    pub created_at: DateTime<Utc>,
    /// When the game last changed.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Budget the game started with, restored on reset.
    pub initial_budget: i64,
    /// Budget left after selections and issues.
    pub current_budget: i64,
    /// The chosen brief.
    pub selected_brief_id: Option<Uuid>,
    /// The chosen venue.
    pub selected_venue_id: Option<Uuid>,
    /// The chosen concept.
    pub selected_concept_id: Option<Uuid>,
    /// The chosen constraint.
    pub selected_constraint_id: Option<Uuid>,
    /// The chosen entertainment.
    pub selected_entertainment_id: Option<Uuid>,
    /// The chosen catering.
    pub selected_catering_id: Option<Uuid>,
    /// Resolved issues in resolution order.
    pub resolved_issue_ids: Vec<Uuid>,
    /// Parallel to `resolved_issue_ids`.
    pub resolved_issue_option_ids: Vec<Uuid>,
    /// The late-game strategy, if chosen.
    pub final_strategy_type: Option<FinalStrategyType>,
    /// Set once the game is completed.
    pub final_score: Option<i32>,
    /// Whether the game has been scored.
    pub is_completed: bool,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            player_id: game.player_id(),
            created_at: game.created_at(),
            updated_at: game.updated_at(),
            version: game.version(),
            initial_budget: game.initial_budget(),
            current_budget: game.current_budget(),
            selected_brief_id: game.selected_brief_id(),
            selected_venue_id: game.selected_venue_id(),
            selected_concept_id: game.selected_concept_id(),
            selected_constraint_id: game.selected_constraint_id(),
            selected_entertainment_id: game.selected_entertainment_id(),
            selected_catering_id: game.selected_catering_id(),
            resolved_issue_ids: game.resolved_issue_ids(),
            resolved_issue_option_ids: game.resolved_issue_option_ids(),
            final_strategy_type: game.final_strategy_type(),
            final_score: game.final_score(),
            is_completed: game.is_completed(),
        }
    }
}

/// Retrieves a game by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the game does not exist.
pub async fn get_game_by_id(
    game_id: Uuid,
    games: &dyn GameRepository,
) -> Result<GameView, DomainError> {
    games
        .find_by_id(game_id)
        .await?
        .map(|game| GameView::from(&game))
        .ok_or_else(|| DomainError::not_found(GAME_KIND, game_id))
}

/// Retrieves the player's game in progress, if any.
///
/// # Errors
///
/// Returns the repository error if the lookup fails.
pub async fn get_active_game_for_player(
    player_id: Uuid,
    games: &dyn GameRepository,
) -> Result<Option<GameView>, DomainError> {
    Ok(games
        .find_active_by_player_id(player_id)
        .await?
        .map(|game| GameView::from(&game)))
}

/// Draws a random issue the game has not resolved yet. Returns `None` once
/// the game cannot resolve more issues or the catalog is exhausted.
///
/// Candidates are ordered by id before the draw so that a seeded RNG always
/// picks the same issue.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game, and
/// `DomainError::Infrastructure` if the RNG lock is poisoned.
pub async fn draw_unexpected_issue(
    game_id: Uuid,
    games: &dyn GameRepository,
    issues: &dyn Repository<UnexpectedIssue>,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> Result<Option<UnexpectedIssue>, DomainError> {
    let game = games
        .find_by_id(game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(GAME_KIND, game_id))?;
    if game.resolved_issues().len() >= MAX_RESOLVED_ISSUES {
        return Ok(None);
    }

    let mut candidates: Vec<UnexpectedIssue> = issues
        .find_all()
        .await?
        .into_iter()
        .filter(|issue| !game.has_resolved(issue.id()))
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    candidates.sort_by_key(Entity::id);

    let last = candidates.len() - 1;
    let max = u32::try_from(last).unwrap_or(u32::MAX);
    let drawn = {
        let mut rng = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        rng.next_u32_range(0, max)
    };
    let index = usize::try_from(drawn).map_or(last, |i| i.min(last));
    Ok(Some(candidates.swap_remove(index)))
}

#[cfg(test)]
mod tests {
    use eventplan_test_support::{FixedClock, RecordingRepository, SequenceRng, fixed_now};

    use super::*;
    use crate::application::fixtures::{self, TestGameRepository};

    fn clock() -> FixedClock {
        FixedClock(fixed_now())
    }

    #[tokio::test]
    async fn test_get_game_by_id_returns_view() {
        // Arrange
        let fixture = fixtures::scoring_catalog();
        let game = fixtures::played_game(&fixture, &clock());
        let games = TestGameRepository::with_game(game.clone());

        // Act
        let view = get_game_by_id(game.id(), &games).await.unwrap();

        // Assert
        assert_eq!(view.id, game.id());
        assert_eq!(view.selected_venue_id, Some(fixture.venue.id()));
        assert_eq!(view.resolved_issue_ids, vec![fixture.issue.id()]);
        assert!(!view.is_completed);
    }

    #[tokio::test]
    async fn test_get_game_by_id_unknown_is_not_found() {
        let games = TestGameRepository::default();

        let result = get_game_by_id(Uuid::new_v4(), &games).await;

        assert!(matches!(result, Err(DomainError::NotFound { kind: "Game", .. })));
    }

    #[tokio::test]
    async fn test_get_active_game_ignores_completed_games() {
        // Arrange
        let fixture = fixtures::scoring_catalog();
        let clock = clock();
        let completed = fixtures::played_game(&fixture, &clock)
            .select_final_strategy(FinalStrategyType::Marketing, 0, &clock)
            .and_then(|g| g.complete(9, &clock))
            .unwrap();
        let games = TestGameRepository::with_game(completed.clone());

        // Act
        let view = get_active_game_for_player(completed.player_id(), &games)
            .await
            .unwrap();

        // Assert
        assert!(view.is_none());
    }

    #[tokio::test]
    async fn test_draw_unexpected_issue_skips_resolved_issues() {
        // Arrange
        let fixture = fixtures::scoring_catalog();
        let game = fixtures::played_game(&fixture, &clock());
        let games = TestGameRepository::with_game(game.clone());
        let issues =
            RecordingRepository::new(vec![fixture.issue.clone(), fixture.second_issue.clone()]);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![0]));

        // Act
        let drawn = draw_unexpected_issue(game.id(), &games, &issues, &rng)
            .await
            .unwrap();

        // Assert
        assert_eq!(drawn, Some(fixture.second_issue));
    }

    #[tokio::test]
    async fn test_draw_unexpected_issue_uses_rng_index() {
        // Arrange
        let fixture = fixtures::scoring_catalog();
        let game = Game::initialize(Uuid::new_v4(), Uuid::new_v4(), 10_000, &clock()).unwrap();
        let games = TestGameRepository::with_game(game.clone());
        let mut expected = vec![fixture.issue.clone(), fixture.second_issue.clone()];
        expected.sort_by_key(Entity::id);
        let issues = RecordingRepository::new(vec![fixture.issue.clone(), fixture.second_issue]);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(vec![1]));

        // Act
        let drawn = draw_unexpected_issue(game.id(), &games, &issues, &rng)
            .await
            .unwrap();

        // Assert
        assert_eq!(drawn.as_ref(), expected.get(1));
    }

    #[tokio::test]
    async fn test_draw_unexpected_issue_none_when_exhausted() {
        let fixture = fixtures::scoring_catalog();
        let game = fixtures::played_game(&fixture, &clock());
        let games = TestGameRepository::with_game(game.clone());
        let issues = RecordingRepository::new(vec![fixture.issue.clone()]);
        let rng: Mutex<SequenceRng> = Mutex::new(SequenceRng::new(Vec::new()));

        let drawn = draw_unexpected_issue(game.id(), &games, &issues, &rng)
            .await
            .unwrap();

        assert!(drawn.is_none());
    }
}
