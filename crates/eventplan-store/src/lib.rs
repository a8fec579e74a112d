//! Event planning game: repository adapters.
//!
//! In-memory repositories back tests and database-less runs; the PostgreSQL
//! repositories persist catalog entries and game snapshots with `sqlx`.

pub mod in_memory;
pub mod pg_catalog_repository;
pub mod pg_game_repository;
pub mod schema;
