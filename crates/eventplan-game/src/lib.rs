//! Event planning game: Game context.
//!
//! Responsible for the game aggregate and its budget invariant, the final
//! score calculation, and the command handlers that move a game from
//! initialization to completion.

pub mod application;
pub mod domain;
