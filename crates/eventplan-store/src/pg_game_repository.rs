//! `PostgreSQL` implementation of the `GameRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eventplan_core::aggregate::AggregateRoot;
use eventplan_core::error::DomainError;
use eventplan_game::domain::aggregates::{FinalStrategyType, Game, GameSnapshot};
use eventplan_game::domain::repository::GameRepository;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::pg_catalog_repository::db_error;
use crate::schema::{GAME_COLUMNS, GAMES_TABLE};

#[derive(Debug, FromRow)]
struct GameRow {
    id: Uuid,
    player_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
    initial_budget: i64,
    current_budget: i64,
    selected_brief_id: Option<Uuid>,
    selected_venue_id: Option<Uuid>,
    selected_concept_id: Option<Uuid>,
    selected_constraint_id: Option<Uuid>,
    selected_entertainment_id: Option<Uuid>,
    selected_catering_id: Option<Uuid>,
    resolved_issue_ids: Json<Vec<Uuid>>,
    resolved_issue_option_ids: Json<Vec<Uuid>>,
    final_strategy_type: Option<String>,
    final_score: Option<i32>,
    is_completed: bool,
}

impl GameRow {
    fn into_game(self) -> Result<Game, DomainError> {
        let final_strategy_type = self
            .final_strategy_type
            .as_deref()
            .map(str::parse::<FinalStrategyType>)
            .transpose()
            .map_err(|e| {
                DomainError::Infrastructure(format!("game {} has a bad strategy: {e}", self.id))
            })?;
        Game::from_snapshot(GameSnapshot {
            id: self.id,
            player_id: self.player_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
            initial_budget: self.initial_budget,
            current_budget: self.current_budget,
            selected_brief_id: self.selected_brief_id,
            selected_venue_id: self.selected_venue_id,
            selected_concept_id: self.selected_concept_id,
            selected_constraint_id: self.selected_constraint_id,
            selected_entertainment_id: self.selected_entertainment_id,
            selected_catering_id: self.selected_catering_id,
            resolved_issue_ids: self.resolved_issue_ids.0,
            resolved_issue_option_ids: self.resolved_issue_option_ids.0,
            final_strategy_type,
            final_score: self.final_score,
            is_completed: self.is_completed,
        })
        .map_err(|e| DomainError::Infrastructure(format!("stored game is inconsistent: {e}")))
    }
}

/// PostgreSQL-backed game repository with optimistic versioning.
#[derive(Debug, Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    /// Creates a new `PgGameRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn stored_version(&self, id: Uuid) -> Result<i64, DomainError> {
        let version: Option<i64> =
            sqlx::query_scalar(&format!("SELECT version FROM {GAMES_TABLE} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(version.unwrap_or(0))
    }

    async fn conflict(&self, game: &Game) -> DomainError {
        match self.stored_version(game.id()).await {
            Ok(actual) => DomainError::ConcurrencyConflict {
                aggregate_id: game.id(),
                expected: game.version(),
                actual,
            },
            Err(e) => e,
        }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        let row: Option<GameRow> =
            sqlx::query_as(&format!("SELECT {GAME_COLUMNS} FROM {GAMES_TABLE} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        row.map(GameRow::into_game).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Game>, DomainError> {
        let rows: Vec<GameRow> = sqlx::query_as(&format!(
            "SELECT {GAME_COLUMNS} FROM {GAMES_TABLE} ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        rows.into_iter().map(GameRow::into_game).collect()
    }

    async fn find_active_by_player_id(
        &self,
        player_id: Uuid,
    ) -> Result<Option<Game>, DomainError> {
        let row: Option<GameRow> = sqlx::query_as(&format!(
            "SELECT {GAME_COLUMNS} FROM {GAMES_TABLE} \
             WHERE player_id = $1 AND NOT is_completed \
             ORDER BY updated_at DESC LIMIT 1"
        ))
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        row.map(GameRow::into_game).transpose()
    }

    async fn save(&self, game: &Game) -> Result<Game, DomainError> {
        let snapshot = game.snapshot();
        let next_version = snapshot.version + 1;
        let is_new = snapshot.version == 0;
        let sql = if is_new {
            format!(
                "INSERT INTO {GAMES_TABLE} ({GAME_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
                 ON CONFLICT (id) DO NOTHING"
            )
        } else {
            format!(
                "UPDATE {GAMES_TABLE} SET player_id = $2, created_at = $3, updated_at = $4, \
                 version = $5, initial_budget = $6, current_budget = $7, \
                 selected_brief_id = $8, selected_venue_id = $9, selected_concept_id = $10, \
                 selected_constraint_id = $11, selected_entertainment_id = $12, \
                 selected_catering_id = $13, resolved_issue_ids = $14, \
                 resolved_issue_option_ids = $15, final_strategy_type = $16, \
                 final_score = $17, is_completed = $18 \
                 WHERE id = $1 AND version = $19"
            )
        };

        let query = sqlx::query(&sql)
            .bind(snapshot.id)
            .bind(snapshot.player_id)
            .bind(snapshot.created_at)
            .bind(snapshot.updated_at)
            .bind(next_version)
            .bind(snapshot.initial_budget)
            .bind(snapshot.current_budget)
            .bind(snapshot.selected_brief_id)
            .bind(snapshot.selected_venue_id)
            .bind(snapshot.selected_concept_id)
            .bind(snapshot.selected_constraint_id)
            .bind(snapshot.selected_entertainment_id)
            .bind(snapshot.selected_catering_id)
            .bind(Json(&snapshot.resolved_issue_ids))
            .bind(Json(&snapshot.resolved_issue_option_ids))
            .bind(snapshot.final_strategy_type.map(FinalStrategyType::as_str))
            .bind(snapshot.final_score)
            .bind(snapshot.is_completed);
        let query = if is_new {
            query
        } else {
            query.bind(snapshot.version)
        };
        let result = query.execute(&self.pool).await.map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(self.conflict(game).await);
        }
        debug!(game_id = %snapshot.id, version = next_version, "game saved");
        Ok(game.clone().with_version(next_version))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {GAMES_TABLE} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
