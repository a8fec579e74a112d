//! Commands for the Catalog context.
//!
//! These are issued by seed and admin processes, never by players.

use eventplan_core::command::Command;
use uuid::Uuid;

/// Command to register a new brief.
#[derive(Debug, Clone)]
pub struct RegisterBrief {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Budget ceiling.
    pub budget: i64,
}

impl Command for RegisterBrief {
    fn command_type(&self) -> &'static str {
        "catalog.register_brief"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register a venue or a concept; both carry a name and a cost.
#[derive(Debug, Clone)]
pub struct RegisterCostedEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Amount charged on selection.
    pub cost: i64,
}

impl Command for RegisterCostedEntry {
    fn command_type(&self) -> &'static str {
        "catalog.register_costed_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register a constraint.
#[derive(Debug, Clone)]
pub struct RegisterConstraint {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Impact rating.
    pub impact: u8,
    /// Informational cost.
    pub cost: i64,
}

impl Command for RegisterConstraint {
    fn command_type(&self) -> &'static str {
        "catalog.register_constraint"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to register an entertainment act or a catering offer.
#[derive(Debug, Clone)]
pub struct RegisterRatedEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Amount charged on selection.
    pub cost: i64,
    /// Guest experience rating, 1–10.
    pub impact: u8,
}

impl Command for RegisterRatedEntry {
    fn command_type(&self) -> &'static str {
        "catalog.register_rated_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// One option inside a [`RegisterUnexpectedIssue`] command.
#[derive(Debug, Clone)]
pub struct IssueOptionSpec {
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Signed budget delta.
    pub budget_impact: i64,
}

/// Command to register an unexpected issue together with its options.
#[derive(Debug, Clone)]
pub struct RegisterUnexpectedIssue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Resolution options; at least one is required.
    pub options: Vec<IssueOptionSpec>,
}

impl Command for RegisterUnexpectedIssue {
    fn command_type(&self) -> &'static str {
        "catalog.register_unexpected_issue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
