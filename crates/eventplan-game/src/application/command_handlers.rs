//! Command handlers for the Game context.
//!
//! Each handler loads the game, enforces the ordering prerequisites that span
//! catalog lookups, loads the referenced catalog entry, applies the aggregate
//! transition and persists the result. Nothing is saved when any step fails.

use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_catalog::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, Venue,
};
use eventplan_core::clock::Clock;
use eventplan_core::command::Command;
use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository, require};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::aggregates::{Game, MAX_RESOLVED_ISSUES, Slot};
use crate::domain::commands::{
    CalculateFinalScore, DeleteGame, InitializeGame, ResetGame, ResolveUnexpectedIssue,
    SelectBrief, SelectCatering, SelectConcept, SelectConstraint, SelectEntertainment,
    SelectFinalStrategy, SelectVenue,
};
use crate::domain::repository::GameRepository;
use crate::domain::scoring::{ScoreBreakdown, ScoreInputs, calculate_score};

/// Kind reported when a game id does not resolve.
pub const GAME_KIND: &str = "Game";

const SCORE_PREREQUISITES: &str = "Cannot calculate score: Brief, Venue, Concept, Constraint, Entertainment, Catering, resolved Issues, and Final Strategy are required";

/// Outcome of `InitializeGame`.
#[derive(Debug, Clone)]
pub struct InitializedGame {
    /// The new game, or the player's game already in progress.
    pub game: Game,
    /// `false` when an active game was resumed.
    pub created: bool,
}

/// Outcome of `CalculateFinalScore`.
#[derive(Debug, Clone)]
pub struct FinalScore {
    /// The completed game.
    pub game: Game,
    /// How the score was reached.
    pub breakdown: ScoreBreakdown,
}

/// Score summary returned alongside the completed game.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    /// Final score in `1..=20`.
    pub final_score: i32,
    /// Every factor of the score.
    pub breakdown: ScoreBreakdown,
}

impl From<&FinalScore> for ScoreSummary {
    fn from(score: &FinalScore) -> Self {
        Self {
            final_score: score.breakdown.final_score,
            breakdown: score.breakdown.clone(),
        }
    }
}

async fn load_game(games: &dyn GameRepository, game_id: Uuid) -> Result<Game, DomainError> {
    games
        .find_by_id(game_id)
        .await?
        .ok_or_else(|| DomainError::not_found(GAME_KIND, game_id))
}

fn log_rejection(command: &dyn Command, game_id: Uuid, error: &DomainError) {
    warn!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        game_id = %game_id,
        error = %error,
        "command rejected"
    );
}

async fn persist(
    command: &dyn Command,
    games: &dyn GameRepository,
    game: &Game,
) -> Result<Game, DomainError> {
    let saved = games.save(game).await?;
    debug!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        game_id = %saved.id(),
        "game saved"
    );
    Ok(saved)
}

fn subject(slot: Slot) -> &'static str {
    match slot {
        Slot::Brief => "A brief",
        Slot::Venue => "A venue",
        Slot::Concept => "A concept",
        Slot::Constraint => "A constraint",
        Slot::Entertainment => "Entertainment",
        Slot::Catering => "Catering",
    }
}

/// Fails on the first slot in `required` that has no selection.
fn require_slots(game: &Game, required: &[Slot], action: &str) -> Result<(), DomainError> {
    match required.iter().find(|slot| game.selected(**slot).is_none()) {
        Some(slot) => Err(DomainError::Prerequisite(format!(
            "{} must be selected before {action}",
            subject(*slot)
        ))),
        None => Ok(()),
    }
}

/// Handles the `InitializeGame` command. A player with a game in progress
/// gets that game back instead of a new one.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a non-positive budget, or the
/// repository error if loading or saving fails.
pub async fn handle_initialize_game(
    command: &InitializeGame,
    clock: &dyn Clock,
    games: &dyn GameRepository,
) -> Result<InitializedGame, DomainError> {
    if let Some(game) = games.find_active_by_player_id(command.player_id).await? {
        debug!(
            correlation_id = %command.correlation_id,
            game_id = %game.id(),
            "resuming active game"
        );
        return Ok(InitializedGame {
            game,
            created: false,
        });
    }

    let game = Game::initialize(
        Uuid::new_v4(),
        command.player_id,
        command.initial_budget,
        clock,
    )?;
    let game = persist(command, games, &game).await?;
    Ok(InitializedGame {
        game,
        created: true,
    })
}

/// Handles the `SelectBrief` command. The current budget becomes the brief's
/// budget.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game or brief,
/// `DomainError::State` if a brief is already selected.
pub async fn handle_select_brief(
    command: &SelectBrief,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    briefs: &dyn Repository<Brief>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    let brief = require(briefs, command.brief_id).await?;

    let next = game
        .select_brief(brief.id(), clock)
        .and_then(|g| g.adjust_budget(brief.budget() - g.current_budget(), clock))
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `SelectVenue` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` without a brief, `DomainError::NotFound`
/// for an unknown game or venue, and the aggregate's errors otherwise.
pub async fn handle_select_venue(
    command: &SelectVenue,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    venues: &dyn Repository<Venue>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    require_slots(&game, &[Slot::Brief], "selecting a venue")
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;
    let venue = require(venues, command.venue_id).await?;

    let next = game
        .select_venue(venue.id(), venue.cost(), clock)
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `SelectConcept` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` without a brief and venue,
/// `DomainError::NotFound` for an unknown game or concept, and the
/// aggregate's errors otherwise.
pub async fn handle_select_concept(
    command: &SelectConcept,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    concepts: &dyn Repository<Concept>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    require_slots(&game, &[Slot::Brief, Slot::Venue], "selecting a concept")
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;
    let concept = require(concepts, command.concept_id).await?;

    let next = game
        .select_concept(concept.id(), concept.cost(), clock)
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `SelectConstraint` command. Constraints are not charged.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` without a brief, venue and concept,
/// `DomainError::NotFound` for an unknown game or constraint, and the
/// aggregate's errors otherwise.
pub async fn handle_select_constraint(
    command: &SelectConstraint,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    constraints: &dyn Repository<Constraint>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    require_slots(
        &game,
        &[Slot::Brief, Slot::Venue, Slot::Concept],
        "selecting a constraint",
    )
    .inspect_err(|e| log_rejection(command, command.game_id, e))?;
    let constraint = require(constraints, command.constraint_id).await?;

    let next = game
        .select_constraint(constraint.id(), clock)
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `SelectEntertainment` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` while an earlier slot is empty,
/// `DomainError::NotFound` for an unknown game or entertainment, and the
/// aggregate's errors otherwise.
pub async fn handle_select_entertainment(
    command: &SelectEntertainment,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    entertainments: &dyn Repository<Entertainment>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    require_slots(
        &game,
        &[Slot::Brief, Slot::Venue, Slot::Concept, Slot::Constraint],
        "selecting entertainment",
    )
    .inspect_err(|e| log_rejection(command, command.game_id, e))?;
    let entertainment = require(entertainments, command.entertainment_id).await?;

    let next = game
        .select_entertainment(entertainment.id(), entertainment.cost(), clock)
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `SelectCatering` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` while an earlier slot is empty,
/// `DomainError::NotFound` for an unknown game or catering,
/// `DomainError::Budget` if the catering is unaffordable, and the aggregate's
/// errors otherwise.
pub async fn handle_select_catering(
    command: &SelectCatering,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    caterings: &dyn Repository<Catering>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    require_slots(
        &game,
        &[
            Slot::Brief,
            Slot::Venue,
            Slot::Concept,
            Slot::Constraint,
            Slot::Entertainment,
        ],
        "selecting catering",
    )
    .inspect_err(|e| log_rejection(command, command.game_id, e))?;
    let catering = require(caterings, command.catering_id).await?;

    let next = game
        .select_catering(catering.id(), catering.cost(), clock)
        .inspect_err(|e| log_rejection(command, command.game_id, e))?;

    persist(command, games, &next).await
}

/// Handles the `ResolveUnexpectedIssue` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` without a brief, venue and concept,
/// when three issues are resolved, or when this issue was resolved already;
/// `DomainError::NotFound` for an unknown game, issue or option;
/// `DomainError::Budget` if the option would overdraw the budget.
pub async fn handle_resolve_unexpected_issue(
    command: &ResolveUnexpectedIssue,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    issues: &dyn Repository<UnexpectedIssue>,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    let reject = |e: &DomainError| log_rejection(command, command.game_id, e);

    if [Slot::Brief, Slot::Venue, Slot::Concept]
        .iter()
        .any(|slot| game.selected(*slot).is_none())
    {
        let err = DomainError::Prerequisite(
            "A brief, venue, and concept must be selected before resolving an unexpected issue"
                .to_owned(),
        );
        reject(&err);
        return Err(err);
    }

    if game.resolved_issues().len() >= MAX_RESOLVED_ISSUES {
        let err = DomainError::Prerequisite(format!(
            "Maximum number of issues ({MAX_RESOLVED_ISSUES}) already resolved"
        ));
        reject(&err);
        return Err(err);
    }
    if game.has_resolved(command.issue_id) {
        let err = DomainError::Prerequisite("This issue has already been resolved".to_owned());
        reject(&err);
        return Err(err);
    }

    let issue = require(issues, command.issue_id).await?;
    let option = issue
        .option_by_id(command.option_id)
        .ok_or_else(|| DomainError::not_found("Option", command.option_id))?;

    let next = game
        .resolve_issue(issue.id(), option.id(), option.budget_impact(), clock)
        .inspect_err(reject)?;

    persist(command, games, &next).await
}

/// Handles the `SelectFinalStrategy` command.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` while any slot is empty or no issue is
/// resolved, `DomainError::NotFound` for an unknown game, and the aggregate's
/// errors otherwise.
pub async fn handle_select_final_strategy(
    command: &SelectFinalStrategy,
    clock: &dyn Clock,
    games: &dyn GameRepository,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    let reject = |e: &DomainError| log_rejection(command, command.game_id, e);

    require_slots(&game, &Slot::ALL, "selecting a final strategy").inspect_err(reject)?;
    if game.resolved_issues().is_empty() {
        let err = DomainError::Prerequisite(
            "At least one unexpected issue must be resolved before selecting a final strategy"
                .to_owned(),
        );
        reject(&err);
        return Err(err);
    }

    let next = game
        .select_final_strategy(command.strategy_type, 0, clock)
        .inspect_err(reject)?;

    persist(command, games, &next).await
}

/// Handles the `CalculateFinalScore` command: scores the game from its
/// selected catalog entries, completes it and persists it.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` if the game is not fully played,
/// `DomainError::State` if it is already completed, and
/// `DomainError::NotFound` for an unknown game or a vanished catalog entry.
pub async fn handle_calculate_final_score(
    command: &CalculateFinalScore,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    catalog: &CatalogRepositories,
) -> Result<FinalScore, DomainError> {
    let game = load_game(games, command.game_id).await?;
    let reject = |e: &DomainError| log_rejection(command, command.game_id, e);

    if !game.is_ready_for_scoring() {
        let err = DomainError::Prerequisite(SCORE_PREREQUISITES.to_owned());
        reject(&err);
        return Err(err);
    }
    if game.is_completed() {
        let err = DomainError::State("Game is already completed".to_owned());
        reject(&err);
        return Err(err);
    }

    let brief = require_selected(catalog.briefs.as_ref(), game.selected_brief_id()).await?;
    let venue = require_selected(catalog.venues.as_ref(), game.selected_venue_id()).await?;
    let concept = require_selected(catalog.concepts.as_ref(), game.selected_concept_id()).await?;
    let constraint =
        require_selected(catalog.constraints.as_ref(), game.selected_constraint_id()).await?;
    let entertainment = require_selected(
        catalog.entertainments.as_ref(),
        game.selected_entertainment_id(),
    )
    .await?;
    let catering = require_selected(catalog.caterings.as_ref(), game.selected_catering_id()).await?;

    let breakdown = calculate_score(&ScoreInputs {
        game: &game,
        brief: &brief,
        venue: &venue,
        concept: &concept,
        constraint: &constraint,
        entertainment: &entertainment,
        catering: &catering,
    })
    .inspect_err(reject)?;

    let completed = game
        .complete(breakdown.final_score, clock)
        .inspect_err(reject)?;
    let game = persist(command, games, &completed).await?;

    Ok(FinalScore { game, breakdown })
}

async fn require_selected<T: Entity>(
    repo: &dyn Repository<T>,
    selected: Option<Uuid>,
) -> Result<T, DomainError> {
    let id = selected.ok_or_else(|| DomainError::Prerequisite(SCORE_PREREQUISITES.to_owned()))?;
    require(repo, id).await
}

/// Handles the `ResetGame` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game, or the repository
/// error if saving fails.
pub async fn handle_reset_game(
    command: &ResetGame,
    clock: &dyn Clock,
    games: &dyn GameRepository,
) -> Result<Game, DomainError> {
    let game = load_game(games, command.game_id).await?;
    let next = game.reset(clock);
    persist(command, games, &next).await
}

/// Handles the `DeleteGame` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no game was deleted.
pub async fn handle_delete_game(
    command: &DeleteGame,
    games: &dyn GameRepository,
) -> Result<(), DomainError> {
    if !games.delete(command.game_id).await? {
        return Err(DomainError::not_found(GAME_KIND, command.game_id));
    }
    debug!(
        correlation_id = %command.correlation_id,
        game_id = %command.game_id,
        "game deleted"
    );
    Ok(())
}
