//! Aggregate root for the Game context.
//!
//! A `Game` is an immutable value: every transition validates its guards
//! against the current snapshot and returns a new `Game`, leaving the
//! original untouched when it fails.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use eventplan_core::aggregate::AggregateRoot;
use eventplan_core::clock::Clock;
use eventplan_core::error::DomainError;
use eventplan_core::validation::require_positive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of unexpected issues a single game can resolve.
pub const MAX_RESOLVED_ISSUES: usize = 3;

const ALREADY_COMPLETED: &str = "Game is already completed";

/// Late-game strategy choice. It only affects the score multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalStrategyType {
    /// High risk, highest multiplier.
    Gambling,
    /// Brand exposure.
    Marketing,
    /// Safe margins, lowest multiplier.
    Profitability,
}

impl FinalStrategyType {
    /// Every strategy, in display order.
    pub const ALL: [Self; 3] = [Self::Gambling, Self::Marketing, Self::Profitability];

    /// Canonical upper-case name, as stored and sent over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gambling => "GAMBLING",
            Self::Marketing => "MARKETING",
            Self::Profitability => "PROFITABILITY",
        }
    }
}

impl fmt::Display for FinalStrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinalStrategyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GAMBLING" => Ok(Self::Gambling),
            "MARKETING" => Ok(Self::Marketing),
            "PROFITABILITY" => Ok(Self::Profitability),
            _ => Err(DomainError::Validation(format!(
                "strategy_type must be one of GAMBLING, MARKETING, PROFITABILITY, got {s:?}"
            ))),
        }
    }
}

/// The six selectable catalog categories, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Client brief; sets the budget.
    Brief,
    /// Venue; charged.
    Venue,
    /// Concept; charged.
    Concept,
    /// Constraint; never charged.
    Constraint,
    /// Entertainment; charged.
    Entertainment,
    /// Catering; charged.
    Catering,
}

impl Slot {
    /// Every slot, in play order.
    pub const ALL: [Self; 6] = [
        Self::Brief,
        Self::Venue,
        Self::Concept,
        Self::Constraint,
        Self::Entertainment,
        Self::Catering,
    ];

    fn index(self) -> usize {
        match self {
            Self::Brief => 0,
            Self::Venue => 1,
            Self::Concept => 2,
            Self::Constraint => 3,
            Self::Entertainment => 4,
            Self::Catering => 5,
        }
    }

    /// Capitalized name used in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Brief => "Brief",
            Self::Venue => "Venue",
            Self::Concept => "Concept",
            Self::Constraint => "Constraint",
            Self::Entertainment => "Entertainment",
            Self::Catering => "Catering",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Venue => "venue",
            Self::Concept => "concept",
            Self::Constraint => "constraint",
            Self::Entertainment => "entertainment",
            Self::Catering => "catering",
        }
    }
}

/// An unexpected issue together with the option chosen to resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIssue {
    /// The issue identifier.
    pub issue_id: Uuid,
    /// The chosen option identifier.
    pub option_id: Uuid,
}

/// Flat, persistence-friendly form of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game identifier.
    pub id: Uuid,
    /// Owning player.
    pub player_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Budget the game was initialized with.
    pub initial_budget: i64,
    /// Budget left to spend.
    pub current_budget: i64,
    /// Selected brief.
    pub selected_brief_id: Option<Uuid>,
    /// Selected venue.
    pub selected_venue_id: Option<Uuid>,
    /// Selected concept.
    pub selected_concept_id: Option<Uuid>,
    /// Selected constraint.
    pub selected_constraint_id: Option<Uuid>,
    /// Selected entertainment.
    pub selected_entertainment_id: Option<Uuid>,
    /// Selected catering.
    pub selected_catering_id: Option<Uuid>,
    /// Resolved issues, in resolution order.
    pub resolved_issue_ids: Vec<Uuid>,
    /// Chosen options, parallel to `resolved_issue_ids`.
    pub resolved_issue_option_ids: Vec<Uuid>,
    /// Chosen final strategy.
    pub final_strategy_type: Option<FinalStrategyType>,
    /// Final score, present only once completed.
    pub final_score: Option<i32>,
    /// Completion flag.
    pub is_completed: bool,
}

/// The aggregate root for one play-through.
///
/// # Invariants
///
/// - each slot goes from empty to a fixed id exactly once (until reset)
/// - at most [`MAX_RESOLVED_ISSUES`] issues, no issue twice, each paired
///   with exactly one option
/// - `final_score` is present iff the game is completed
/// - a charged selection or issue resolution never drives the budget below
///   zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: Uuid,
    player_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
    initial_budget: i64,
    current_budget: i64,
    selections: [Option<Uuid>; 6],
    resolved_issues: Vec<ResolvedIssue>,
    final_strategy: Option<FinalStrategyType>,
    final_score: Option<i32>,
}

impl Game {
    /// Starts a new game with the full initial budget available.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `initial_budget` is not positive.
    pub fn initialize(
        id: Uuid,
        player_id: Uuid,
        initial_budget: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        require_positive("Game", "initial budget", initial_budget)?;
        let now = clock.now();
        Ok(Self {
            id,
            player_id,
            created_at: now,
            updated_at: now,
            version: 0,
            initial_budget,
            current_budget: initial_budget,
            selections: [None; 6],
            resolved_issues: Vec::new(),
            final_strategy: None,
            final_score: None,
        })
    }

    /// Rebuilds a game from its persisted form, checking the structural
    /// invariants. The current budget is taken as stored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the snapshot is inconsistent.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, DomainError> {
        require_positive("Game", "initial budget", snapshot.initial_budget)?;

        if snapshot.resolved_issue_ids.len() != snapshot.resolved_issue_option_ids.len() {
            return Err(DomainError::Validation(format!(
                "game {} has {} resolved issues but {} chosen options",
                snapshot.id,
                snapshot.resolved_issue_ids.len(),
                snapshot.resolved_issue_option_ids.len()
            )));
        }
        if snapshot.resolved_issue_ids.len() > MAX_RESOLVED_ISSUES {
            return Err(DomainError::Validation(format!(
                "game {} has more than {MAX_RESOLVED_ISSUES} resolved issues",
                snapshot.id
            )));
        }
        for (index, issue_id) in snapshot.resolved_issue_ids.iter().enumerate() {
            if snapshot.resolved_issue_ids[..index].contains(issue_id) {
                return Err(DomainError::Validation(format!(
                    "game {} resolved issue {issue_id} twice",
                    snapshot.id
                )));
            }
        }
        if snapshot.is_completed != snapshot.final_score.is_some() {
            return Err(DomainError::Validation(format!(
                "game {} completion flag disagrees with its final score",
                snapshot.id
            )));
        }

        let resolved_issues = snapshot
            .resolved_issue_ids
            .iter()
            .zip(&snapshot.resolved_issue_option_ids)
            .map(|(&issue_id, &option_id)| ResolvedIssue {
                issue_id,
                option_id,
            })
            .collect();

        Ok(Self {
            id: snapshot.id,
            player_id: snapshot.player_id,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
            version: snapshot.version,
            initial_budget: snapshot.initial_budget,
            current_budget: snapshot.current_budget,
            selections: [
                snapshot.selected_brief_id,
                snapshot.selected_venue_id,
                snapshot.selected_concept_id,
                snapshot.selected_constraint_id,
                snapshot.selected_entertainment_id,
                snapshot.selected_catering_id,
            ],
            resolved_issues,
            final_strategy: snapshot.final_strategy_type,
            final_score: snapshot.final_score,
        })
    }

    /// Returns the persisted form of this game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            player_id: self.player_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
            initial_budget: self.initial_budget,
            current_budget: self.current_budget,
            selected_brief_id: self.selected(Slot::Brief),
            selected_venue_id: self.selected(Slot::Venue),
            selected_concept_id: self.selected(Slot::Concept),
            selected_constraint_id: self.selected(Slot::Constraint),
            selected_entertainment_id: self.selected(Slot::Entertainment),
            selected_catering_id: self.selected(Slot::Catering),
            resolved_issue_ids: self.resolved_issue_ids(),
            resolved_issue_option_ids: self.resolved_issue_option_ids(),
            final_strategy_type: self.final_strategy,
            final_score: self.final_score,
            is_completed: self.is_completed(),
        }
    }

    /// Returns this game stamped with the version assigned by a repository.
    #[must_use]
    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    // --- accessors ---

    /// Game identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning player.
    #[must_use]
    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Budget the game was initialized with.
    #[must_use]
    pub fn initial_budget(&self) -> i64 {
        self.initial_budget
    }

    /// Budget left to spend.
    #[must_use]
    pub fn current_budget(&self) -> i64 {
        self.current_budget
    }

    /// The id selected for `slot`, if any.
    #[must_use]
    pub fn selected(&self, slot: Slot) -> Option<Uuid> {
        self.selections[slot.index()]
    }

    /// Selected brief.
    #[must_use]
    pub fn selected_brief_id(&self) -> Option<Uuid> {
        self.selected(Slot::Brief)
    }

    /// Selected venue.
    #[must_use]
    pub fn selected_venue_id(&self) -> Option<Uuid> {
        self.selected(Slot::Venue)
    }

    /// Selected concept.
    #[must_use]
    pub fn selected_concept_id(&self) -> Option<Uuid> {
        self.selected(Slot::Concept)
    }

    /// Selected constraint.
    #[must_use]
    pub fn selected_constraint_id(&self) -> Option<Uuid> {
        self.selected(Slot::Constraint)
    }

    /// Selected entertainment.
    #[must_use]
    pub fn selected_entertainment_id(&self) -> Option<Uuid> {
        self.selected(Slot::Entertainment)
    }

    /// Selected catering.
    #[must_use]
    pub fn selected_catering_id(&self) -> Option<Uuid> {
        self.selected(Slot::Catering)
    }

    /// Resolved issues with their chosen options, in resolution order.
    #[must_use]
    pub fn resolved_issues(&self) -> &[ResolvedIssue] {
        &self.resolved_issues
    }

    /// Resolved issue ids, in resolution order.
    #[must_use]
    pub fn resolved_issue_ids(&self) -> Vec<Uuid> {
        self.resolved_issues.iter().map(|r| r.issue_id).collect()
    }

    /// Chosen option ids, parallel to [`Self::resolved_issue_ids`].
    #[must_use]
    pub fn resolved_issue_option_ids(&self) -> Vec<Uuid> {
        self.resolved_issues.iter().map(|r| r.option_id).collect()
    }

    /// Whether `issue_id` has been resolved in this game.
    #[must_use]
    pub fn has_resolved(&self, issue_id: Uuid) -> bool {
        self.resolved_issues.iter().any(|r| r.issue_id == issue_id)
    }

    /// Chosen final strategy.
    #[must_use]
    pub fn final_strategy_type(&self) -> Option<FinalStrategyType> {
        self.final_strategy
    }

    /// Final score, present only once completed.
    #[must_use]
    pub fn final_score(&self) -> Option<i32> {
        self.final_score
    }

    /// Whether the game has been scored and closed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.final_score.is_some()
    }

    /// Slots still waiting for a selection, in play order.
    #[must_use]
    pub fn missing_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.selected(*slot).is_none())
            .collect()
    }

    /// Whether every prerequisite for scoring is in place.
    #[must_use]
    pub fn is_ready_for_scoring(&self) -> bool {
        self.missing_slots().is_empty()
            && !self.resolved_issues.is_empty()
            && self.final_strategy.is_some()
    }

    // --- transitions ---

    /// Records the brief. The budget is left alone; callers reset it to the
    /// brief's budget with [`Self::adjust_budget`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the game is completed or a brief is
    /// already selected.
    pub fn select_brief(&self, brief_id: Uuid, clock: &dyn Clock) -> Result<Self, DomainError> {
        self.select_slot(Slot::Brief, brief_id, 0, clock)
    }

    /// Records the venue and charges its cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the slot is taken or the game is
    /// completed, `DomainError::Budget` if `cost` exceeds the budget.
    pub fn select_venue(
        &self,
        venue_id: Uuid,
        cost: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.select_slot(Slot::Venue, venue_id, cost, clock)
    }

    /// Records the concept and charges its cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the slot is taken or the game is
    /// completed, `DomainError::Budget` if `cost` exceeds the budget.
    pub fn select_concept(
        &self,
        concept_id: Uuid,
        cost: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.select_slot(Slot::Concept, concept_id, cost, clock)
    }

    /// Records the constraint. Constraints are never charged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the slot is taken or the game is
    /// completed.
    pub fn select_constraint(
        &self,
        constraint_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.select_slot(Slot::Constraint, constraint_id, 0, clock)
    }

    /// Records the entertainment and charges its cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the slot is taken or the game is
    /// completed, `DomainError::Budget` if `cost` exceeds the budget.
    pub fn select_entertainment(
        &self,
        entertainment_id: Uuid,
        cost: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.select_slot(Slot::Entertainment, entertainment_id, cost, clock)
    }

    /// Records the catering and charges its cost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the slot is taken or the game is
    /// completed, `DomainError::Budget` if `cost` exceeds the budget.
    pub fn select_catering(
        &self,
        catering_id: Uuid,
        cost: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.select_slot(Slot::Catering, catering_id, cost, clock)
    }

    /// Resolves an unexpected issue with one of its options, applying the
    /// option's signed budget impact.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the game is completed,
    /// `DomainError::Prerequisite` if the issue limit is reached or the issue
    /// was already resolved, `DomainError::Budget` if the impact would leave
    /// the budget negative.
    pub fn resolve_issue(
        &self,
        issue_id: Uuid,
        option_id: Uuid,
        budget_impact: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.ensure_in_progress()?;
        if self.resolved_issues.len() >= MAX_RESOLVED_ISSUES {
            return Err(DomainError::Prerequisite(format!(
                "Maximum number of issues ({MAX_RESOLVED_ISSUES}) already resolved"
            )));
        }
        if self.has_resolved(issue_id) {
            return Err(DomainError::Prerequisite(
                "This issue has already been resolved".to_owned(),
            ));
        }
        let budget = self.budget_after(budget_impact, "resolve this issue")?;

        let mut next = self.touched(clock);
        next.resolved_issues.push(ResolvedIssue {
            issue_id,
            option_id,
        });
        next.current_budget = budget;
        Ok(next)
    }

    /// Records the final strategy and applies its budget impact.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the game is completed or a strategy is
    /// already set, `DomainError::Budget` if the impact would leave the budget
    /// negative.
    pub fn select_final_strategy(
        &self,
        strategy: FinalStrategyType,
        budget_impact: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.ensure_in_progress()?;
        if self.final_strategy.is_some() {
            return Err(DomainError::State(
                "Final strategy already selected".to_owned(),
            ));
        }
        let budget = self.budget_after(budget_impact, "apply this strategy")?;

        let mut next = self.touched(clock);
        next.final_strategy = Some(strategy);
        next.current_budget = budget;
        Ok(next)
    }

    /// Applies a signed amount to the current budget.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if the game is completed,
    /// `DomainError::Budget` if the result would be negative.
    pub fn adjust_budget(&self, amount: i64, clock: &dyn Clock) -> Result<Self, DomainError> {
        self.ensure_in_progress()?;
        let budget = self.budget_after(amount, "adjust the budget")?;

        let mut next = self.touched(clock);
        next.current_budget = budget;
        Ok(next)
    }

    /// Closes the game with its final score.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::State` if already completed,
    /// `DomainError::Prerequisite` if any selection, issue resolution, or the
    /// strategy is missing.
    pub fn complete(&self, final_score: i32, clock: &dyn Clock) -> Result<Self, DomainError> {
        self.ensure_in_progress()?;
        if !self.is_ready_for_scoring() {
            return Err(DomainError::Prerequisite(
                "Cannot complete game: missing required selections".to_owned(),
            ));
        }

        let mut next = self.touched(clock);
        next.final_score = Some(final_score);
        Ok(next)
    }

    /// Clears every selection and all progress, restoring the initial
    /// budget. Identity, owner and creation time are kept.
    #[must_use]
    pub fn reset(&self, clock: &dyn Clock) -> Self {
        Self {
            id: self.id,
            player_id: self.player_id,
            created_at: self.created_at,
            updated_at: clock.now(),
            version: self.version,
            initial_budget: self.initial_budget,
            current_budget: self.initial_budget,
            selections: [None; 6],
            resolved_issues: Vec::new(),
            final_strategy: None,
            final_score: None,
        }
    }

    // --- guards ---

    fn touched(&self, clock: &dyn Clock) -> Self {
        let mut next = self.clone();
        next.updated_at = clock.now();
        next
    }

    fn ensure_in_progress(&self) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::State(ALREADY_COMPLETED.to_owned()));
        }
        Ok(())
    }

    fn budget_after(&self, delta: i64, action: &str) -> Result<i64, DomainError> {
        let budget = self.current_budget.checked_add(delta).ok_or_else(|| {
            DomainError::Validation(format!("budget change of {delta} is out of range"))
        })?;
        if budget < 0 {
            if delta >= 0 {
                return Err(DomainError::Budget(format!(
                    "Not enough budget to {action}. Shortfall: {}, Available: {}",
                    budget.saturating_neg(),
                    self.current_budget
                )));
            }
            return Err(DomainError::insufficient_budget(
                action,
                delta.saturating_abs(),
                self.current_budget,
            ));
        }
        Ok(budget)
    }

    fn select_slot(
        &self,
        slot: Slot,
        entry_id: Uuid,
        cost: i64,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        self.ensure_in_progress()?;
        if self.selected(slot).is_some() {
            return Err(DomainError::State(format!(
                "{} already selected",
                slot.label()
            )));
        }
        let charge = cost.max(0);
        if charge > 0 && charge > self.current_budget {
            return Err(DomainError::insufficient_budget(
                &format!("select this {}", slot.noun()),
                charge,
                self.current_budget,
            ));
        }

        let mut next = self.touched(clock);
        next.selections[slot.index()] = Some(entry_id);
        next.current_budget -= charge;
        Ok(next)
    }
}

impl AggregateRoot for Game {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use eventplan_test_support::{FixedClock, fixed_now};

    fn clock() -> FixedClock {
        FixedClock(fixed_now())
    }

    fn new_game(budget: i64) -> Game {
        Game::initialize(Uuid::new_v4(), Uuid::new_v4(), budget, &clock()).unwrap()
    }

    /// A game with every slot filled and one issue resolved.
    fn fully_selected(budget: i64) -> Game {
        let clock = clock();
        new_game(budget)
            .select_brief(Uuid::new_v4(), &clock)
            .and_then(|g| g.select_venue(Uuid::new_v4(), 1_000, &clock))
            .and_then(|g| g.select_concept(Uuid::new_v4(), 1_000, &clock))
            .and_then(|g| g.select_constraint(Uuid::new_v4(), &clock))
            .and_then(|g| g.select_entertainment(Uuid::new_v4(), 1_000, &clock))
            .and_then(|g| g.select_catering(Uuid::new_v4(), 1_000, &clock))
            .and_then(|g| g.resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -500, &clock))
            .unwrap()
    }

    fn state_message(err: DomainError) -> String {
        match err {
            DomainError::State(msg) => msg,
            other => panic!("expected State, got {other:?}"),
        }
    }

    fn prerequisite_message(err: DomainError) -> String {
        match err {
            DomainError::Prerequisite(msg) => msg,
            other => panic!("expected Prerequisite, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_starts_with_full_budget_and_empty_slots() {
        // Arrange
        let id = Uuid::new_v4();
        let player_id = Uuid::new_v4();

        // Act
        let game = Game::initialize(id, player_id, 10_000, &clock()).unwrap();

        // Assert
        assert_eq!(game.id(), id);
        assert_eq!(game.player_id(), player_id);
        assert_eq!(game.initial_budget(), 10_000);
        assert_eq!(game.current_budget(), 10_000);
        assert_eq!(game.missing_slots(), Slot::ALL.to_vec());
        assert!(game.resolved_issues().is_empty());
        assert!(game.final_strategy_type().is_none());
        assert!(game.final_score().is_none());
        assert!(!game.is_completed());
        assert_eq!(game.version(), 0);
        assert_eq!(game.created_at(), game.updated_at());
    }

    #[test]
    fn test_initialize_rejects_non_positive_budget() {
        let result = Game::initialize(Uuid::new_v4(), Uuid::new_v4(), 0, &clock());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_select_brief_records_id_without_touching_budget() {
        // Arrange
        let game = new_game(10_000);
        let brief_id = Uuid::new_v4();

        // Act
        let next = game.select_brief(brief_id, &clock()).unwrap();

        // Assert
        assert_eq!(next.selected_brief_id(), Some(brief_id));
        assert_eq!(next.current_budget(), 10_000);
        assert!(game.selected_brief_id().is_none());
    }

    #[test]
    fn test_select_brief_twice_fails_with_state_error() {
        let game = new_game(10_000).select_brief(Uuid::new_v4(), &clock()).unwrap();

        let err = game.select_brief(Uuid::new_v4(), &clock()).unwrap_err();

        assert_eq!(state_message(err), "Brief already selected");
    }

    #[test]
    fn test_select_venue_charges_cost() {
        let game = new_game(10_000);

        let next = game.select_venue(Uuid::new_v4(), 2_000, &clock()).unwrap();

        assert_eq!(next.current_budget(), 8_000);
    }

    #[test]
    fn test_select_venue_with_zero_cost_is_free() {
        let game = new_game(10_000);

        let next = game.select_venue(Uuid::new_v4(), 0, &clock()).unwrap();

        assert_eq!(next.current_budget(), 10_000);
    }

    #[test]
    fn test_select_concept_allows_spending_exact_budget() {
        let game = new_game(3_000);

        let next = game.select_concept(Uuid::new_v4(), 3_000, &clock()).unwrap();

        assert_eq!(next.current_budget(), 0);
    }

    #[test]
    fn test_select_catering_over_budget_fails_and_leaves_game_unchanged() {
        // Arrange
        let game = new_game(1_000);
        let before = game.clone();

        // Act
        let err = game
            .select_catering(Uuid::new_v4(), 1_500, &clock())
            .unwrap_err();

        // Assert
        match err {
            DomainError::Budget(msg) => {
                assert!(msg.contains("Cost: 1500, Available: 1000"), "{msg}");
                assert!(msg.contains("catering"));
            }
            other => panic!("expected Budget, got {other:?}"),
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_select_entertainment_twice_fails_even_when_affordable() {
        let game = new_game(10_000)
            .select_entertainment(Uuid::new_v4(), 1_000, &clock())
            .unwrap();

        let err = game
            .select_entertainment(Uuid::new_v4(), 1_000, &clock())
            .unwrap_err();

        assert_eq!(state_message(err), "Entertainment already selected");
    }

    #[test]
    fn test_select_constraint_is_never_charged() {
        let game = new_game(10_000);

        let next = game.select_constraint(Uuid::new_v4(), &clock()).unwrap();

        assert_eq!(next.current_budget(), 10_000);
        assert!(next.selected_constraint_id().is_some());
    }

    #[test]
    fn test_select_updates_timestamp() {
        // Arrange
        let game = new_game(10_000);
        let later = FixedClock(clock().0 + Duration::minutes(5));

        // Act
        let next = game.select_constraint(Uuid::new_v4(), &later).unwrap();

        // Assert
        assert_eq!(next.updated_at(), later.0);
        assert_eq!(next.created_at(), game.created_at());
    }

    #[test]
    fn test_resolve_issue_appends_pair_and_applies_impact() {
        // Arrange
        let game = new_game(8_000);
        let issue_id = Uuid::new_v4();
        let option_id = Uuid::new_v4();

        // Act
        let next = game
            .resolve_issue(issue_id, option_id, -1_000, &clock())
            .unwrap();

        // Assert
        assert_eq!(next.current_budget(), 7_000);
        assert_eq!(next.resolved_issue_ids(), vec![issue_id]);
        assert_eq!(next.resolved_issue_option_ids(), vec![option_id]);
    }

    #[test]
    fn test_resolve_issue_with_positive_impact_increases_budget() {
        let game = new_game(8_000);

        let next = game
            .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), 1_000, &clock())
            .unwrap();

        assert_eq!(next.current_budget(), 9_000);
    }

    #[test]
    fn test_resolve_issue_rejects_fourth_issue() {
        // Arrange
        let clock = clock();
        let game = new_game(10_000)
            .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -100, &clock)
            .and_then(|g| g.resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -100, &clock))
            .and_then(|g| g.resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -100, &clock))
            .unwrap();

        // Act
        let err = game
            .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -100, &clock)
            .unwrap_err();

        // Assert
        assert_eq!(
            prerequisite_message(err),
            "Maximum number of issues (3) already resolved"
        );
    }

    #[test]
    fn test_resolve_issue_rejects_duplicate_issue() {
        let issue_id = Uuid::new_v4();
        let game = new_game(10_000)
            .resolve_issue(issue_id, Uuid::new_v4(), -100, &clock())
            .unwrap();

        let err = game
            .resolve_issue(issue_id, Uuid::new_v4(), -100, &clock())
            .unwrap_err();

        assert_eq!(
            prerequisite_message(err),
            "This issue has already been resolved"
        );
    }

    #[test]
    fn test_resolve_issue_that_would_overdraw_fails_and_keeps_budget() {
        // Arrange
        let game = new_game(1_000);

        // Act
        let err = game
            .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), -1_001, &clock())
            .unwrap_err();

        // Assert
        match err {
            DomainError::Budget(msg) => assert!(msg.contains("Cost: 1001, Available: 1000")),
            other => panic!("expected Budget, got {other:?}"),
        }
        assert_eq!(game.current_budget(), 1_000);
        assert!(game.resolved_issues().is_empty());
    }

    #[test]
    fn test_income_on_negative_stored_budget_reports_shortfall() {
        // Arrange
        let mut snapshot = new_game(1_000).snapshot();
        snapshot.current_budget = -300;
        let game = Game::from_snapshot(snapshot).unwrap();

        // Act
        let err = game
            .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), 200, &clock())
            .unwrap_err();

        // Assert
        match err {
            DomainError::Budget(msg) => {
                assert!(msg.contains("Shortfall: 100, Available: -300"), "{msg}");
                assert!(!msg.contains("Cost"), "{msg}");
            }
            other => panic!("expected Budget, got {other:?}"),
        }
    }

    #[test]
    fn test_select_final_strategy_sets_type_once() {
        // Arrange
        let game = new_game(10_000)
            .select_final_strategy(FinalStrategyType::Marketing, 0, &clock())
            .unwrap();

        // Act
        let err = game
            .select_final_strategy(FinalStrategyType::Gambling, 0, &clock())
            .unwrap_err();

        // Assert
        assert_eq!(
            game.final_strategy_type(),
            Some(FinalStrategyType::Marketing)
        );
        assert_eq!(state_message(err), "Final strategy already selected");
    }

    #[test]
    fn test_select_final_strategy_rejects_overdrawing_impact() {
        let game = new_game(500);

        let result = game.select_final_strategy(FinalStrategyType::Gambling, -600, &clock());

        assert!(matches!(result, Err(DomainError::Budget(_))));
    }

    #[test]
    fn test_adjust_budget_resets_to_brief_budget() {
        let game = new_game(10_000)
            .select_venue(Uuid::new_v4(), 4_000, &clock())
            .unwrap();

        let next = game
            .adjust_budget(12_000 - game.current_budget(), &clock())
            .unwrap();

        assert_eq!(next.current_budget(), 12_000);
    }

    #[test]
    fn test_adjust_budget_rejects_negative_result() {
        let game = new_game(1_000);

        let result = game.adjust_budget(-1_001, &clock());

        assert!(matches!(result, Err(DomainError::Budget(_))));
    }

    #[test]
    fn test_adjust_budget_rejects_overflow() {
        let game = new_game(1_000);

        let result = game.adjust_budget(i64::MAX, &clock());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_complete_requires_all_selections() {
        let game = new_game(10_000)
            .select_brief(Uuid::new_v4(), &clock())
            .unwrap();

        let err = game.complete(10, &clock()).unwrap_err();

        assert_eq!(
            prerequisite_message(err),
            "Cannot complete game: missing required selections"
        );
    }

    #[test]
    fn test_complete_requires_strategy() {
        let game = fully_selected(10_000);

        let result = game.complete(10, &clock());

        assert!(matches!(result, Err(DomainError::Prerequisite(_))));
    }

    #[test]
    fn test_complete_sets_score_and_flag() {
        // Arrange
        let game = fully_selected(10_000)
            .select_final_strategy(FinalStrategyType::Profitability, 0, &clock())
            .unwrap();

        // Act
        let completed = game.complete(14, &clock()).unwrap();

        // Assert
        assert!(completed.is_completed());
        assert_eq!(completed.final_score(), Some(14));
    }

    #[test]
    fn test_completed_game_rejects_further_transitions() {
        // Arrange
        let clock = clock();
        let completed = fully_selected(10_000)
            .select_final_strategy(FinalStrategyType::Gambling, 0, &clock)
            .and_then(|g| g.complete(12, &clock))
            .unwrap();

        // Act & Assert
        assert_eq!(
            state_message(completed.complete(5, &clock).unwrap_err()),
            "Game is already completed"
        );
        assert_eq!(
            state_message(
                completed
                    .resolve_issue(Uuid::new_v4(), Uuid::new_v4(), 0, &clock)
                    .unwrap_err()
            ),
            "Game is already completed"
        );
        assert!(matches!(
            completed.adjust_budget(100, &clock),
            Err(DomainError::State(_))
        ));
    }

    #[test]
    fn test_reset_clears_progress_and_restores_initial_budget() {
        // Arrange
        let clock = clock();
        let completed = fully_selected(10_000)
            .select_final_strategy(FinalStrategyType::Gambling, 0, &clock)
            .and_then(|g| g.complete(12, &clock))
            .unwrap();

        // Act
        let reset = completed.reset(&clock);

        // Assert
        assert_eq!(reset.id(), completed.id());
        assert_eq!(reset.player_id(), completed.player_id());
        assert_eq!(reset.current_budget(), 10_000);
        assert_eq!(reset.missing_slots().len(), 6);
        assert!(reset.resolved_issues().is_empty());
        assert!(reset.final_strategy_type().is_none());
        assert!(!reset.is_completed());
        assert!(reset.final_score().is_none());
    }

    #[test]
    fn test_snapshot_round_trip_preserves_game() {
        let game = fully_selected(10_000).with_version(4);

        let restored = Game::from_snapshot(game.snapshot()).unwrap();

        assert_eq!(restored, game);
        assert_eq!(restored.version(), 4);
    }

    #[test]
    fn test_from_snapshot_rejects_mismatched_issue_lists() {
        let mut snapshot = new_game(10_000).snapshot();
        snapshot.resolved_issue_ids.push(Uuid::new_v4());

        let result = Game::from_snapshot(snapshot);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_from_snapshot_rejects_completed_without_score() {
        let mut snapshot = new_game(10_000).snapshot();
        snapshot.is_completed = true;

        let result = Game::from_snapshot(snapshot);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_from_snapshot_rejects_duplicate_issue() {
        let mut snapshot = new_game(10_000).snapshot();
        let issue_id = Uuid::new_v4();
        snapshot.resolved_issue_ids = vec![issue_id, issue_id];
        snapshot.resolved_issue_option_ids = vec![Uuid::new_v4(), Uuid::new_v4()];

        let result = Game::from_snapshot(snapshot);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_strategy_parses_case_insensitively() {
        assert_eq!(
            "gambling".parse::<FinalStrategyType>().unwrap(),
            FinalStrategyType::Gambling
        );
        assert_eq!(
            "PROFITABILITY".parse::<FinalStrategyType>().unwrap(),
            FinalStrategyType::Profitability
        );
        assert!(matches!(
            "yolo".parse::<FinalStrategyType>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_strategy_serializes_upper_case() {
        let json = serde_json::to_string(&FinalStrategyType::Marketing).unwrap();
        assert_eq!(json, "\"MARKETING\"");
    }
}
