//! Final score calculation.
//!
//! Six catalog-derived factors plus the budget efficiency are summed, scaled
//! by the strategy multiplier and mapped linearly from `0..=RAW_SCORE_CEILING`
//! onto `MIN_SCORE..=MAX_SCORE`.

use eventplan_catalog::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, Venue,
};
use eventplan_core::error::DomainError;
use eventplan_core::repository::Entity;
use serde::Serialize;
use uuid::Uuid;

use super::aggregates::{FinalStrategyType, Game};

/// Lowest possible final score.
pub const MIN_SCORE: i32 = 1;
/// Highest possible final score.
pub const MAX_SCORE: i32 = 20;
/// Raw score mapped onto `MAX_SCORE`.
pub const RAW_SCORE_CEILING: f64 = 300.0;

const COST_DIVISOR: f64 = 1000.0;
const CONSTRAINT_IMPACT_WEIGHT: f64 = 2.0;
const ENTERTAINMENT_IMPACT_WEIGHT: f64 = 3.0;
const CATERING_IMPACT_WEIGHT: f64 = 3.0;

/// Score multiplier for a strategy. No strategy scores neutrally.
#[must_use]
pub fn strategy_multiplier(strategy: Option<FinalStrategyType>) -> f64 {
    match strategy {
        Some(FinalStrategyType::Gambling) => 1.2,
        Some(FinalStrategyType::Marketing) => 1.1,
        Some(FinalStrategyType::Profitability) => 1.05,
        None => 1.0,
    }
}

/// Everything the calculator reads: the game and the entries it selected.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    /// The game being scored.
    pub game: &'a Game,
    /// The selected brief.
    pub brief: &'a Brief,
    /// The selected venue.
    pub venue: &'a Venue,
    /// The selected concept.
    pub concept: &'a Concept,
    /// The selected constraint.
    pub constraint: &'a Constraint,
    /// The selected entertainment.
    pub entertainment: &'a Entertainment,
    /// The selected catering.
    pub catering: &'a Catering,
}

/// Every factor of a computed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Remaining budget as a percentage of the brief budget.
    pub budget_efficiency: f64,
    /// Venue cost in thousands.
    pub venue_score: f64,
    /// Concept cost in thousands.
    pub concept_score: f64,
    /// Constraint impact, doubled.
    pub constraint_impact_score: f64,
    /// Constraint cost in thousands.
    pub constraint_cost_score: f64,
    /// Entertainment impact, tripled.
    pub entertainment_impact_score: f64,
    /// Catering impact, tripled.
    pub catering_impact_score: f64,
    /// Weight of the chosen strategy.
    pub strategy_multiplier: f64,
    /// Factor sum after the multiplier.
    pub raw_score: f64,
    /// Rescaled, clamped and rounded.
    pub final_score: i32,
}

fn prerequisites_met(game: &Game) -> bool {
    game.is_ready_for_scoring()
}

fn ensure_selected(kind: &str, selected: Option<Uuid>, provided: Uuid) -> Result<(), DomainError> {
    if selected == Some(provided) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "{kind} {provided} is not the one selected in this game"
        )))
    }
}

/// Computes the final score of a fully played game.
///
/// # Errors
///
/// Returns `DomainError::Prerequisite` if any selection, issue resolution or
/// the strategy is missing, and `DomainError::Validation` if an entry passed
/// in is not the one the game selected.
pub fn calculate_score(inputs: &ScoreInputs<'_>) -> Result<ScoreBreakdown, DomainError> {
    let game = inputs.game;
    if !prerequisites_met(game) {
        return Err(DomainError::Prerequisite(
            "Cannot calculate score: Brief, Venue, Concept, Constraint, Entertainment, Catering, resolved Issues, and Final Strategy are required"
                .to_owned(),
        ));
    }
    ensure_selected(Brief::KIND, game.selected_brief_id(), inputs.brief.id())?;
    ensure_selected(Venue::KIND, game.selected_venue_id(), inputs.venue.id())?;
    ensure_selected(Concept::KIND, game.selected_concept_id(), inputs.concept.id())?;
    ensure_selected(
        Constraint::KIND,
        game.selected_constraint_id(),
        inputs.constraint.id(),
    )?;
    ensure_selected(
        Entertainment::KIND,
        game.selected_entertainment_id(),
        inputs.entertainment.id(),
    )?;
    ensure_selected(Catering::KIND, game.selected_catering_id(), inputs.catering.id())?;

    Ok(breakdown(inputs))
}

#[allow(clippy::cast_precision_loss)]
fn breakdown(inputs: &ScoreInputs<'_>) -> ScoreBreakdown {
    let budget_efficiency =
        inputs.game.current_budget() as f64 / inputs.brief.budget() as f64 * 100.0;
    let venue_score = inputs.venue.cost() as f64 / COST_DIVISOR;
    let concept_score = inputs.concept.cost() as f64 / COST_DIVISOR;
    let constraint_impact_score = f64::from(inputs.constraint.impact()) * CONSTRAINT_IMPACT_WEIGHT;
    let constraint_cost_score = inputs.constraint.cost() as f64 / COST_DIVISOR;
    let entertainment_impact_score =
        f64::from(inputs.entertainment.impact()) * ENTERTAINMENT_IMPACT_WEIGHT;
    let catering_impact_score = f64::from(inputs.catering.impact()) * CATERING_IMPACT_WEIGHT;

    let multiplier = strategy_multiplier(inputs.game.final_strategy_type());
    let raw_score = (budget_efficiency
        + venue_score
        + concept_score
        + constraint_impact_score
        + constraint_cost_score
        + entertainment_impact_score
        + catering_impact_score)
        * multiplier;

    ScoreBreakdown {
        budget_efficiency,
        venue_score,
        concept_score,
        constraint_impact_score,
        constraint_cost_score,
        entertainment_impact_score,
        catering_impact_score,
        strategy_multiplier: multiplier,
        raw_score,
        final_score: rescale(raw_score),
    }
}

// Clamped to [MIN_SCORE, MAX_SCORE] before the cast.
#[allow(clippy::cast_possible_truncation)]
fn rescale(raw_score: f64) -> i32 {
    let min = f64::from(MIN_SCORE);
    let max = f64::from(MAX_SCORE);
    let scaled = min + (raw_score / RAW_SCORE_CEILING) * (max - min);
    scaled.clamp(min, max).round() as i32
}
