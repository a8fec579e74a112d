//! Catalog entities.
//!
//! Every entity validates its fields at construction time, so an invalid
//! catalog entry can never exist. Entities are immutable afterwards.

use eventplan_core::error::DomainError;
use eventplan_core::repository::Entity;
use eventplan_core::validation::{require_in_range, require_non_empty, require_positive};
use serde::Serialize;
use uuid::Uuid;

/// Lowest impact rating an entry can carry.
pub const MIN_IMPACT: u8 = 1;

/// Highest impact rating an entry can carry.
pub const MAX_IMPACT: u8 = 10;

/// A client engagement, carrying the budget ceiling for the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brief {
    id: Uuid,
    name: String,
    description: String,
    budget: i64,
}

impl Brief {
    /// Creates a validated brief.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank
    /// or `budget` is not positive.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        budget: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Brief", "name", &name)?;
        require_non_empty("Brief", "description", &description)?;
        require_positive("Brief", "budget", budget)?;
        Ok(Self {
            id,
            name,
            description,
            budget,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Budget ceiling granted to the player when this brief is picked.
    #[must_use]
    pub fn budget(&self) -> i64 {
        self.budget
    }
}

impl Entity for Brief {
    const KIND: &'static str = "Brief";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Where the event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Venue {
    id: Uuid,
    name: String,
    description: String,
    cost: i64,
}

impl Venue {
    /// Creates a validated venue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank
    /// or `cost` is not positive.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Venue", "name", &name)?;
        require_non_empty("Venue", "description", &description)?;
        require_positive("Venue", "cost", cost)?;
        Ok(Self {
            id,
            name,
            description,
            cost,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount charged against the budget on selection.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }
}

impl Entity for Venue {
    const KIND: &'static str = "Venue";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// The theme of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    id: Uuid,
    name: String,
    description: String,
    cost: i64,
}

impl Concept {
    /// Creates a validated concept.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank
    /// or `cost` is not positive.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Concept", "name", &name)?;
        require_non_empty("Concept", "description", &description)?;
        require_positive("Concept", "cost", cost)?;
        Ok(Self {
            id,
            name,
            description,
            cost,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount charged against the budget on selection.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }
}

impl Entity for Concept {
    const KIND: &'static str = "Concept";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A requirement the event has to accommodate.
///
/// The cost is informational: it feeds the score but is never charged
/// against the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    id: Uuid,
    name: String,
    description: String,
    impact: u8,
    cost: i64,
}

impl Constraint {
    /// Creates a validated constraint.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank,
    /// `impact` is zero, or `cost` is not positive.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        impact: u8,
        cost: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Constraint", "name", &name)?;
        require_non_empty("Constraint", "description", &description)?;
        require_positive("Constraint", "impact", i64::from(impact))?;
        require_positive("Constraint", "cost", cost)?;
        Ok(Self {
            id,
            name,
            description,
            impact,
            cost,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// How strongly the constraint shapes the event.
    #[must_use]
    pub fn impact(&self) -> u8 {
        self.impact
    }

    /// Informational cost, used only in scoring.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }
}

impl Entity for Constraint {
    const KIND: &'static str = "Constraint";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// An entertainment act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entertainment {
    id: Uuid,
    name: String,
    description: String,
    cost: i64,
    impact: u8,
}

impl Entertainment {
    /// Creates a validated entertainment act.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank,
    /// `cost` is not positive, or `impact` is outside 1–10.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: i64,
        impact: u8,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Entertainment", "name", &name)?;
        require_non_empty("Entertainment", "description", &description)?;
        require_positive("Entertainment", "cost", cost)?;
        require_in_range("Entertainment", "impact", impact, MIN_IMPACT, MAX_IMPACT)?;
        Ok(Self {
            id,
            name,
            description,
            cost,
            impact,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount charged against the budget on selection.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Contribution to guest experience, 1–10.
    #[must_use]
    pub fn impact(&self) -> u8 {
        self.impact
    }
}

impl Entity for Entertainment {
    const KIND: &'static str = "Entertainment";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A catering offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catering {
    id: Uuid,
    name: String,
    description: String,
    cost: i64,
    impact: u8,
}

impl Catering {
    /// Creates a validated catering offer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank,
    /// `cost` is not positive, or `impact` is outside 1–10.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: i64,
        impact: u8,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("Catering", "name", &name)?;
        require_non_empty("Catering", "description", &description)?;
        require_positive("Catering", "cost", cost)?;
        require_in_range("Catering", "impact", impact, MIN_IMPACT, MAX_IMPACT)?;
        Ok(Self {
            id,
            name,
            description,
            cost,
            impact,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount charged against the budget on selection.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Guest satisfaction rating, 1–10.
    #[must_use]
    pub fn impact(&self) -> u8 {
        self.impact
    }
}

impl Entity for Catering {
    const KIND: &'static str = "Catering";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// One way of resolving an unexpected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnexpectedIssueOption {
    id: Uuid,
    name: String,
    description: String,
    budget_impact: i64,
}

impl UnexpectedIssueOption {
    /// Creates a validated option. `budget_impact` may be of either sign.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        budget_impact: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("UnexpectedIssueOption", "name", &name)?;
        require_non_empty("UnexpectedIssueOption", "description", &description)?;
        Ok(Self {
            id,
            name,
            description,
            budget_impact,
        })
    }

    /// Option identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Signed budget delta applied when this option is chosen.
    #[must_use]
    pub fn budget_impact(&self) -> i64 {
        self.budget_impact
    }
}

/// A random event with several resolution options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnexpectedIssue {
    id: Uuid,
    name: String,
    description: String,
    options: Vec<UnexpectedIssueOption>,
}

impl UnexpectedIssue {
    /// Creates a validated issue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` or `description` is blank,
    /// `options` is empty, or two options share an id.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<UnexpectedIssueOption>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let description = description.into();
        require_non_empty("UnexpectedIssue", "name", &name)?;
        require_non_empty("UnexpectedIssue", "description", &description)?;
        if options.is_empty() {
            return Err(DomainError::Validation(
                "UnexpectedIssue must have at least one option".to_owned(),
            ));
        }
        for (index, option) in options.iter().enumerate() {
            if options[..index].iter().any(|o| o.id == option.id) {
                return Err(DomainError::Validation(format!(
                    "UnexpectedIssue option {} is listed twice",
                    option.id
                )));
            }
        }
        Ok(Self {
            id,
            name,
            description,
            options,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The available resolution options, in catalog order.
    #[must_use]
    pub fn options(&self) -> &[UnexpectedIssueOption] {
        &self.options
    }

    /// Looks up one of this issue's options.
    #[must_use]
    pub fn option_by_id(&self, option_id: Uuid) -> Option<&UnexpectedIssueOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}

impl Entity for UnexpectedIssue {
    const KIND: &'static str = "Unexpected Issue";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_brief_rejects_non_positive_budget() {
        let err = Brief::new(Uuid::new_v4(), "Gala", "A gala", 0).unwrap_err();
        assert_eq!(validation_message(err), "Brief budget must be greater than 0");
    }

    #[test]
    fn test_brief_rejects_blank_name() {
        let err = Brief::new(Uuid::new_v4(), "", "A gala", 10_000).unwrap_err();
        assert_eq!(validation_message(err), "Brief name is required");
    }

    #[test]
    fn test_venue_exposes_validated_fields() {
        let id = Uuid::new_v4();
        let venue = Venue::new(id, "Grand Ballroom", "Chandeliers", 15_000).unwrap();
        assert_eq!(venue.id(), id);
        assert_eq!(venue.name(), "Grand Ballroom");
        assert_eq!(venue.cost(), 15_000);
    }

    #[test]
    fn test_concept_rejects_negative_cost() {
        let err = Concept::new(Uuid::new_v4(), "Expo", "Tech", -5).unwrap_err();
        assert_eq!(validation_message(err), "Concept cost must be greater than 0");
    }

    #[test]
    fn test_constraint_rejects_zero_impact() {
        let err = Constraint::new(Uuid::new_v4(), "Security", "VIPs", 0, 1_000).unwrap_err();
        assert_eq!(validation_message(err), "Constraint impact must be greater than 0");
    }

    #[test]
    fn test_entertainment_impact_must_be_between_one_and_ten() {
        let err = Entertainment::new(Uuid::new_v4(), "Band", "Jazz", 5_000, 11).unwrap_err();
        assert_eq!(
            validation_message(err),
            "Entertainment impact must be between 1 and 10"
        );
        assert!(Entertainment::new(Uuid::new_v4(), "Band", "Jazz", 5_000, 10).is_ok());
    }

    #[test]
    fn test_catering_impact_must_be_between_one_and_ten() {
        let err = Catering::new(Uuid::new_v4(), "Buffet", "World food", 10_000, 0).unwrap_err();
        assert_eq!(
            validation_message(err),
            "Catering impact must be between 1 and 10"
        );
    }

    #[test]
    fn test_unexpected_issue_requires_an_option() {
        let err = UnexpectedIssue::new(Uuid::new_v4(), "Storm", "Rain", Vec::new()).unwrap_err();
        assert_eq!(
            validation_message(err),
            "UnexpectedIssue must have at least one option"
        );
    }

    #[test]
    fn test_unexpected_issue_rejects_duplicate_option_ids() {
        let option_id = Uuid::new_v4();
        let option = UnexpectedIssueOption::new(option_id, "Tent", "Rent tents", -3_000).unwrap();
        let err = UnexpectedIssue::new(
            Uuid::new_v4(),
            "Storm",
            "Rain",
            vec![option.clone(), option],
        )
        .unwrap_err();
        assert!(validation_message(err).contains(&option_id.to_string()));
    }

    #[test]
    fn test_option_by_id_finds_matching_option() {
        let keep = UnexpectedIssueOption::new(Uuid::new_v4(), "Tent", "Rent tents", -3_000).unwrap();
        let other =
            UnexpectedIssueOption::new(Uuid::new_v4(), "Sponsor", "Find sponsors", 1_000).unwrap();
        let issue = UnexpectedIssue::new(
            Uuid::new_v4(),
            "Storm",
            "Rain",
            vec![keep.clone(), other],
        )
        .unwrap();

        assert_eq!(issue.option_by_id(keep.id()), Some(&keep));
        assert!(issue.option_by_id(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_option_allows_positive_budget_impact() {
        let option =
            UnexpectedIssueOption::new(Uuid::new_v4(), "Publicity", "Leverage it", 1_000).unwrap();
        assert_eq!(option.budget_impact(), 1_000);
    }
}
