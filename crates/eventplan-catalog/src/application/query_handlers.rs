//! Query handlers for the Catalog context.

use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository, require};
use uuid::Uuid;

/// Lists every entry of one catalog type, ordered by name for stable output.
///
/// # Errors
///
/// Returns the repository error if loading fails.
pub async fn list_entries<T, F>(repo: &dyn Repository<T>, name_of: F) -> Result<Vec<T>, DomainError>
where
    T: Entity,
    F: Fn(&T) -> &str,
{
    let mut entries = repo.find_all().await?;
    entries.sort_by(|a, b| name_of(a).cmp(name_of(b)));
    Ok(entries)
}

/// Retrieves a single catalog entry by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no entry has this id.
pub async fn get_entry<T: Entity>(id: Uuid, repo: &dyn Repository<T>) -> Result<T, DomainError> {
    require(repo, id).await
}
