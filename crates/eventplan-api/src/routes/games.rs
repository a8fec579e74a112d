//! Routes for the Game context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use eventplan_catalog::domain::entities::UnexpectedIssue;
use eventplan_core::error::DomainError;
use eventplan_core::validation::parse_id;
use eventplan_game::application::command_handlers::{self, ScoreSummary};
use eventplan_game::application::query_handlers::{self, GameView};
use eventplan_game::domain::aggregates::FinalStrategyType;
use eventplan_game::domain::commands;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct InitializeGameRequest {
    /// The player starting the game.
    #[serde(default)]
    pub player_id: String,
    /// Starting budget, a positive integer.
    pub initial_budget: Option<i64>,
}

/// Request body for POST /{id}/brief.
#[derive(Debug, Deserialize)]
pub struct SelectBriefRequest {
    /// The brief to select.
    #[serde(default)]
    pub brief_id: String,
}

/// Request body for POST /{id}/venue.
#[derive(Debug, Deserialize)]
pub struct SelectVenueRequest {
    /// The venue to select.
    #[serde(default)]
    pub venue_id: String,
}

/// Request body for POST /{id}/concept.
#[derive(Debug, Deserialize)]
pub struct SelectConceptRequest {
    /// The concept to select.
    #[serde(default)]
    pub concept_id: String,
}

/// Request body for POST /{id}/constraint.
#[derive(Debug, Deserialize)]
pub struct SelectConstraintRequest {
    /// The constraint to select.
    #[serde(default)]
    pub constraint_id: String,
}

/// Request body for POST /{id}/entertainment.
#[derive(Debug, Deserialize)]
pub struct SelectEntertainmentRequest {
    /// The entertainment act to select.
    #[serde(default)]
    pub entertainment_id: String,
}

/// Request body for POST /{id}/catering.
#[derive(Debug, Deserialize)]
pub struct SelectCateringRequest {
    /// The catering offer to select.
    #[serde(default)]
    pub catering_id: String,
}

/// Request body for POST /{id}/issues.
#[derive(Debug, Deserialize)]
pub struct ResolveIssueRequest {
    /// The issue being resolved.
    #[serde(default)]
    pub issue_id: String,
    /// The chosen option of that issue.
    #[serde(default)]
    pub option_id: String,
}

/// Request body for POST /{id}/strategy.
#[derive(Debug, Deserialize)]
pub struct SelectStrategyRequest {
    /// `GAMBLING`, `MARKETING` or `PROFITABILITY`.
    #[serde(default)]
    pub strategy_type: String,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct InitializeGameResponse {
    /// The new or resumed game.
    pub game: GameView,
    /// `false` when the player's active game was returned.
    pub created: bool,
}

/// Response body for POST /{id}/score.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    /// The completed game.
    pub game: GameView,
    /// The final score and its factors.
    #[serde(flatten)]
    pub score: ScoreSummary,
}

/// Response body for GET /{id}/next-issue.
#[derive(Debug, Serialize)]
pub struct NextIssueResponse {
    /// The drawn issue, `null` when no issue is left to resolve.
    pub issue: Option<UnexpectedIssue>,
}

/// Response body for GET /players/{player_id}/active-game.
#[derive(Debug, Serialize)]
pub struct ActiveGameResponse {
    /// The game in progress, `null` when there is none.
    pub game: Option<GameView>,
}

/// POST /
#[instrument(skip(state, request))]
async fn initialize_game(
    State(state): State<AppState>,
    Json(request): Json<InitializeGameRequest>,
) -> Result<(StatusCode, Json<InitializeGameResponse>), ApiError> {
    let command = commands::InitializeGame {
        correlation_id: Uuid::new_v4(),
        player_id: parse_id("player_id", &request.player_id)?,
        initial_budget: request
            .initial_budget
            .ok_or_else(|| DomainError::Validation("initial_budget is required".to_owned()))?,
    };

    info!(
        correlation_id = %command.correlation_id,
        player_id = %command.player_id,
        "handling initialize_game command"
    );

    let outcome =
        command_handlers::handle_initialize_game(&command, state.clock.as_ref(), &*state.games)
            .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(InitializeGameResponse {
            game: GameView::from(&outcome.game),
            created: outcome.created,
        }),
    ))
}

/// GET /{id}
#[instrument(skip(state, id), fields(game_id = %id))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game_id = parse_id("game_id", &id)?;
    let view = query_handlers::get_game_by_id(game_id, &*state.games).await?;
    Ok(Json(view))
}

/// DELETE /{id}
#[instrument(skip(state, id), fields(game_id = %id))]
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteGame {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_game command");

    command_handlers::handle_delete_game(&command, &*state.games).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /{id}/brief
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectBriefRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectBrief {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        brief_id: parse_id("brief_id", &request.brief_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_brief command");

    let game = command_handlers::handle_select_brief(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.briefs,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/venue
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectVenueRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectVenue {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        venue_id: parse_id("venue_id", &request.venue_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_venue command");

    let game = command_handlers::handle_select_venue(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.venues,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/concept
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_concept(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectConceptRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectConcept {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        concept_id: parse_id("concept_id", &request.concept_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_concept command");

    let game = command_handlers::handle_select_concept(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.concepts,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/constraint
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_constraint(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectConstraintRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectConstraint {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        constraint_id: parse_id("constraint_id", &request.constraint_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_constraint command");

    let game = command_handlers::handle_select_constraint(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.constraints,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/entertainment
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_entertainment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectEntertainmentRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectEntertainment {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        entertainment_id: parse_id("entertainment_id", &request.entertainment_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_entertainment command");

    let game = command_handlers::handle_select_entertainment(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.entertainments,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/catering
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_catering(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectCateringRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectCatering {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        catering_id: parse_id("catering_id", &request.catering_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling select_catering command");

    let game = command_handlers::handle_select_catering(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.caterings,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/issues
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn resolve_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ResolveIssueRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::ResolveUnexpectedIssue {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        issue_id: parse_id("issue_id", &request.issue_id)?,
        option_id: parse_id("option_id", &request.option_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling resolve_unexpected_issue command");

    let game = command_handlers::handle_resolve_unexpected_issue(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &*state.catalog.issues,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// GET /{id}/next-issue
#[instrument(skip(state, id), fields(game_id = %id))]
async fn next_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NextIssueResponse>, ApiError> {
    let game_id = parse_id("game_id", &id)?;
    let issue = query_handlers::draw_unexpected_issue(
        game_id,
        &*state.games,
        &*state.catalog.issues,
        &state.rng,
    )
    .await?;
    Ok(Json(NextIssueResponse { issue }))
}

/// POST /{id}/strategy
#[instrument(skip(state, id, request), fields(game_id = %id))]
async fn select_strategy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectStrategyRequest>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::SelectFinalStrategy {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
        strategy_type: request.strategy_type.parse::<FinalStrategyType>()?,
    };

    info!(
        correlation_id = %command.correlation_id,
        strategy_type = %command.strategy_type,
        "handling select_final_strategy command"
    );

    let game = command_handlers::handle_select_final_strategy(
        &command,
        state.clock.as_ref(),
        &*state.games,
    )
    .await?;

    Ok(Json(GameView::from(&game)))
}

/// POST /{id}/score
#[instrument(skip(state, id), fields(game_id = %id))]
async fn calculate_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let command = commands::CalculateFinalScore {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling calculate_final_score command");

    let outcome = command_handlers::handle_calculate_final_score(
        &command,
        state.clock.as_ref(),
        &*state.games,
        &state.catalog,
    )
    .await?;

    info!(final_score = outcome.breakdown.final_score, "game completed");

    Ok(Json(ScoreResponse {
        game: GameView::from(&outcome.game),
        score: ScoreSummary::from(&outcome),
    }))
}

/// POST /{id}/reset
#[instrument(skip(state, id), fields(game_id = %id))]
async fn reset_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let command = commands::ResetGame {
        correlation_id: Uuid::new_v4(),
        game_id: parse_id("game_id", &id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling reset_game command");

    let game =
        command_handlers::handle_reset_game(&command, state.clock.as_ref(), &*state.games).await?;

    Ok(Json(GameView::from(&game)))
}

/// GET /{player_id}/active-game
#[instrument(skip(state, player_id), fields(player_id = %player_id))]
async fn active_game(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<ActiveGameResponse>, ApiError> {
    let player_id = parse_id("player_id", &player_id)?;
    let game = query_handlers::get_active_game_for_player(player_id, &*state.games).await?;
    Ok(Json(ActiveGameResponse { game }))
}

/// Returns the router for the game context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(initialize_game))
        .route("/{id}", get(get_game).delete(delete_game))
        .route("/{id}/brief", post(select_brief))
        .route("/{id}/venue", post(select_venue))
        .route("/{id}/concept", post(select_concept))
        .route("/{id}/constraint", post(select_constraint))
        .route("/{id}/entertainment", post(select_entertainment))
        .route("/{id}/catering", post(select_catering))
        .route("/{id}/issues", post(resolve_issue))
        .route("/{id}/next-issue", get(next_issue))
        .route("/{id}/strategy", post(select_strategy))
        .route("/{id}/score", post(calculate_score))
        .route("/{id}/reset", post(reset_game))
}

/// Returns the router for player lookups.
pub fn players_router() -> Router<AppState> {
    Router::new().route("/{player_id}/active-game", get(active_game))
}
