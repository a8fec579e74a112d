//! Commands for the Game context.

use eventplan_core::command::Command;
use uuid::Uuid;

use super::aggregates::FinalStrategyType;

/// Command to start a game for a player, or resume their active one.
#[derive(Debug, Clone)]
pub struct InitializeGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player starting the game.
    pub player_id: Uuid,
    /// Budget the game starts with.
    pub initial_budget: i64,
}

impl Command for InitializeGame {
    fn command_type(&self) -> &'static str {
        "game.initialize"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select the client brief.
#[derive(Debug, Clone)]
pub struct SelectBrief {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The brief to select.
    pub brief_id: Uuid,
}

impl Command for SelectBrief {
    fn command_type(&self) -> &'static str {
        "game.select_brief"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select a venue.
#[derive(Debug, Clone)]
pub struct SelectVenue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The venue to select.
    pub venue_id: Uuid,
}

impl Command for SelectVenue {
    fn command_type(&self) -> &'static str {
        "game.select_venue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select a concept.
#[derive(Debug, Clone)]
pub struct SelectConcept {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The concept to select.
    pub concept_id: Uuid,
}

impl Command for SelectConcept {
    fn command_type(&self) -> &'static str {
        "game.select_concept"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select a constraint.
#[derive(Debug, Clone)]
pub struct SelectConstraint {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The constraint to select.
    pub constraint_id: Uuid,
}

impl Command for SelectConstraint {
    fn command_type(&self) -> &'static str {
        "game.select_constraint"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select an entertainment act.
#[derive(Debug, Clone)]
pub struct SelectEntertainment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The entertainment to select.
    pub entertainment_id: Uuid,
}

impl Command for SelectEntertainment {
    fn command_type(&self) -> &'static str {
        "game.select_entertainment"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to select a catering offer.
#[derive(Debug, Clone)]
pub struct SelectCatering {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The catering to select.
    pub catering_id: Uuid,
}

impl Command for SelectCatering {
    fn command_type(&self) -> &'static str {
        "game.select_catering"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to resolve an unexpected issue with one of its options.
#[derive(Debug, Clone)]
pub struct ResolveUnexpectedIssue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The issue being resolved.
    pub issue_id: Uuid,
    /// The chosen option.
    pub option_id: Uuid,
}

impl Command for ResolveUnexpectedIssue {
    fn command_type(&self) -> &'static str {
        "game.resolve_unexpected_issue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to choose the final strategy.
#[derive(Debug, Clone)]
pub struct SelectFinalStrategy {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
    /// The chosen strategy.
    pub strategy_type: FinalStrategyType,
}

impl Command for SelectFinalStrategy {
    fn command_type(&self) -> &'static str {
        "game.select_final_strategy"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to score and complete a game.
#[derive(Debug, Clone)]
pub struct CalculateFinalScore {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
}

impl Command for CalculateFinalScore {
    fn command_type(&self) -> &'static str {
        "game.calculate_final_score"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to clear all progress on a game.
#[derive(Debug, Clone)]
pub struct ResetGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
}

impl Command for ResetGame {
    fn command_type(&self) -> &'static str {
        "game.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to remove a game.
#[derive(Debug, Clone)]
pub struct DeleteGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target game.
    pub game_id: Uuid,
}

impl Command for DeleteGame {
    fn command_type(&self) -> &'static str {
        "game.delete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
