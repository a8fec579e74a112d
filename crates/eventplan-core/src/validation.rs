//! Field validation helpers used by typed constructors.
//!
//! Each helper fails with `DomainError::Validation` naming the entity and
//! field that was rejected.

use uuid::Uuid;

use crate::error::DomainError;

/// Rejects empty or whitespace-only text.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `value` is blank.
pub fn require_non_empty(entity: &str, field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{entity} {field} is required"
        )));
    }
    Ok(())
}

/// Rejects zero and negative amounts.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `value <= 0`.
pub fn require_positive(entity: &str, field: &str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation(format!(
            "{entity} {field} must be greater than 0"
        )));
    }
    Ok(())
}

/// Rejects values outside `[min, max]`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `value` is out of range.
pub fn require_in_range(
    entity: &str,
    field: &str,
    value: u8,
    min: u8,
    max: u8,
) -> Result<(), DomainError> {
    if !(min..=max).contains(&value) {
        return Err(DomainError::Validation(format!(
            "{entity} {field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Parses a UUID-formatted identifier.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `value` is empty or not a UUID.
pub fn parse_id(field: &str, value: &str) -> Result<Uuid, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| DomainError::Validation(format!("{field} must be a valid UUID")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_rejects_blank() {
        let err = require_non_empty("Venue", "name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "validation error: Venue name is required");
    }

    #[test]
    fn test_require_positive_rejects_zero() {
        assert!(require_positive("Venue", "cost", 0).is_err());
        assert!(require_positive("Venue", "cost", 1).is_ok());
    }

    #[test]
    fn test_require_in_range_bounds_are_inclusive() {
        assert!(require_in_range("Catering", "impact", 1, 1, 10).is_ok());
        assert!(require_in_range("Catering", "impact", 10, 1, 10).is_ok());
        assert!(require_in_range("Catering", "impact", 0, 1, 10).is_err());
        assert!(require_in_range("Catering", "impact", 11, 1, 10).is_err());
    }

    #[test]
    fn test_parse_id_accepts_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("game_id", &id.to_string()).unwrap(), id);

        match parse_id("game_id", "not-a-uuid").unwrap_err() {
            DomainError::Validation(msg) => assert_eq!(msg, "game_id must be a valid UUID"),
            other => panic!("expected Validation, got {other:?}"),
        }
        match parse_id("game_id", "").unwrap_err() {
            DomainError::Validation(msg) => assert_eq!(msg, "game_id is required"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
