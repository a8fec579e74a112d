//! Table and column names shared by the PostgreSQL repositories.
//!
//! The tables themselves are created by the SQL migrations at the workspace
//! root.

/// Briefs, venues, concepts, constraints, entertainment and catering.
pub const CATALOG_ENTRIES_TABLE: &str = "catalog_entries";

/// Unexpected issue headers.
pub const UNEXPECTED_ISSUES_TABLE: &str = "unexpected_issues";

/// Options of unexpected issues, ordered by `position`.
pub const UNEXPECTED_ISSUE_OPTIONS_TABLE: &str = "unexpected_issue_options";

/// Game snapshots.
pub const GAMES_TABLE: &str = "games";

/// Columns of a catalog entry row.
pub const CATALOG_ENTRY_COLUMNS: &str = "id, kind, name, description, budget, cost, impact";

/// Columns of a game row.
pub const GAME_COLUMNS: &str = "id, player_id, created_at, updated_at, version, \
    initial_budget, current_budget, selected_brief_id, selected_venue_id, \
    selected_concept_id, selected_constraint_id, selected_entertainment_id, \
    selected_catering_id, resolved_issue_ids, resolved_issue_option_ids, \
    final_strategy_type, final_score, is_completed";
