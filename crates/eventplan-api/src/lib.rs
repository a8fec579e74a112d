//! Event planning game: HTTP API.
//!
//! The binary in `main.rs` reads [`config::AppConfig`], builds the
//! [`state::AppState`] and serves [`app`].

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Builds the full route tree over the given state.
///
/// Middleware layers are added by the caller so tests can drive the bare
/// router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .nest("/api/v1/players", routes::games::players_router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .with_state(state)
}
