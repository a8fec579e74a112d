//! Shared application state.

use std::sync::{Arc, Mutex};

use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_catalog::seed::seed_catalog;
use eventplan_core::clock::{Clock, SystemClock};
use eventplan_core::rng::{DeterministicRng, SystemRng};
use eventplan_game::domain::repository::GameRepository;
use eventplan_store::in_memory::{InMemoryGameRepository, in_memory_catalog};
use eventplan_store::pg_catalog_repository::pg_catalog;
use eventplan_store::pg_game_repository::PgGameRepository;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG behind the unexpected issue draw.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Game persistence.
    pub games: Arc<dyn GameRepository>,
    /// Catalog persistence.
    pub catalog: CatalogRepositories,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        games: Arc<dyn GameRepository>,
        catalog: CatalogRepositories,
    ) -> Self {
        Self {
            clock,
            rng,
            games,
            catalog,
        }
    }

    /// State over fresh, empty in-memory repositories.
    #[must_use]
    pub fn in_memory(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self::new(
            clock,
            rng,
            Arc::new(InMemoryGameRepository::new()),
            in_memory_catalog(),
        )
    }

    /// State over PostgreSQL repositories sharing one pool.
    #[must_use]
    pub fn postgres(
        pool: &PgPool,
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    ) -> Self {
        Self::new(
            clock,
            rng,
            Arc::new(PgGameRepository::new(pool.clone())),
            pg_catalog(pool),
        )
    }

    /// Builds production state: system clock, OS-seeded RNG, and the store
    /// selected by `config`. Migrations run before a PostgreSQL store is used.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the database is unreachable, a migration fails
    /// or the catalog cannot be seeded.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
            Arc::new(Mutex::new(SystemRng::from_os()));

        let state = if let Some(database_url) = &config.database_url {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("../../migrations").run(&pool).await?;
            info!("using PostgreSQL repositories");
            Self::postgres(&pool, clock, rng)
        } else {
            info!("using in-memory repositories");
            Self::in_memory(clock, rng)
        };

        if config.seed_catalog {
            let summary = seed_catalog(&state.catalog).await?;
            info!(entries = summary.entries, "default catalog seeded");
        }
        Ok(state)
    }
}
