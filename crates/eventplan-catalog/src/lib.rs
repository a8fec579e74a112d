//! Event planning game: Catalog context.
//!
//! Holds the immutable entries a player picks from: briefs, venues,
//! concepts, constraints, entertainment, catering and unexpected issues.
//! Entries are created by seed/admin processes and referenced by id from
//! games.

pub mod application;
pub mod domain;
pub mod seed;
