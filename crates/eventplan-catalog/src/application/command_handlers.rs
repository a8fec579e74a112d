//! Command handlers for the Catalog context.
//!
//! Each handler validates the command by constructing the entity, assigns a
//! fresh identifier and persists it.

use eventplan_core::command::Command;
use eventplan_core::error::DomainError;
use eventplan_core::repository::Repository;
use tracing::debug;
use uuid::Uuid;

use crate::domain::commands::{
    RegisterBrief, RegisterConstraint, RegisterCostedEntry, RegisterRatedEntry,
    RegisterUnexpectedIssue,
};
use crate::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, UnexpectedIssueOption,
    Venue,
};

fn log_registered(command: &dyn Command, id: Uuid) {
    debug!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        entry_id = %id,
        "catalog entry registered"
    );
}

/// Handles the `RegisterBrief` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_brief(
    command: &RegisterBrief,
    repo: &dyn Repository<Brief>,
) -> Result<Brief, DomainError> {
    let id = Uuid::new_v4();
    let brief = Brief::new(id, &command.name, &command.description, command.budget)?;
    let saved = repo.save(brief).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles a `RegisterCostedEntry` command for a venue.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_venue(
    command: &RegisterCostedEntry,
    repo: &dyn Repository<Venue>,
) -> Result<Venue, DomainError> {
    let id = Uuid::new_v4();
    let venue = Venue::new(id, &command.name, &command.description, command.cost)?;
    let saved = repo.save(venue).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles a `RegisterCostedEntry` command for a concept.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_concept(
    command: &RegisterCostedEntry,
    repo: &dyn Repository<Concept>,
) -> Result<Concept, DomainError> {
    let id = Uuid::new_v4();
    let concept = Concept::new(id, &command.name, &command.description, command.cost)?;
    let saved = repo.save(concept).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles the `RegisterConstraint` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_constraint(
    command: &RegisterConstraint,
    repo: &dyn Repository<Constraint>,
) -> Result<Constraint, DomainError> {
    let id = Uuid::new_v4();
    let constraint = Constraint::new(
        id,
        &command.name,
        &command.description,
        command.impact,
        command.cost,
    )?;
    let saved = repo.save(constraint).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles a `RegisterRatedEntry` command for an entertainment act.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_entertainment(
    command: &RegisterRatedEntry,
    repo: &dyn Repository<Entertainment>,
) -> Result<Entertainment, DomainError> {
    let id = Uuid::new_v4();
    let entertainment = Entertainment::new(
        id,
        &command.name,
        &command.description,
        command.cost,
        command.impact,
    )?;
    let saved = repo.save(entertainment).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles a `RegisterRatedEntry` command for a catering offer.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid fields, or the repository
/// error if saving fails.
pub async fn handle_register_catering(
    command: &RegisterRatedEntry,
    repo: &dyn Repository<Catering>,
) -> Result<Catering, DomainError> {
    let id = Uuid::new_v4();
    let catering = Catering::new(
        id,
        &command.name,
        &command.description,
        command.cost,
        command.impact,
    )?;
    let saved = repo.save(catering).await?;
    log_registered(command, id);
    Ok(saved)
}

/// Handles the `RegisterUnexpectedIssue` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the issue or any option is invalid,
/// or the repository error if saving fails.
pub async fn handle_register_unexpected_issue(
    command: &RegisterUnexpectedIssue,
    repo: &dyn Repository<UnexpectedIssue>,
) -> Result<UnexpectedIssue, DomainError> {
    let options = command
        .options
        .iter()
        .map(|spec| {
            UnexpectedIssueOption::new(
                Uuid::new_v4(),
                &spec.name,
                &spec.description,
                spec.budget_impact,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let id = Uuid::new_v4();
    let issue = UnexpectedIssue::new(id, &command.name, &command.description, options)?;
    let saved = repo.save(issue).await?;
    log_registered(command, id);
    Ok(saved)
}
