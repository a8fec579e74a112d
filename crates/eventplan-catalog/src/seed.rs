//! Default catalog shipped with the game.
//!
//! Identifiers are stable so that a reseeded store keeps references from
//! existing games valid.

use eventplan_core::error::DomainError;
use tracing::info;
use uuid::Uuid;

use crate::application::repositories::CatalogRepositories;
use crate::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, UnexpectedIssueOption,
    Venue,
};

const BRIEF_BASE: u128 = 0x0b1e_f000_0000_4000_8000_0000_0000_0000;
const VENUE_BASE: u128 = 0x0e4e_0000_0000_4000_8000_0000_0000_0000;
const CONCEPT_BASE: u128 = 0x0c04_cef7_0000_4000_8000_0000_0000_0000;
const CONSTRAINT_BASE: u128 = 0x0c04_574a_0000_4000_8000_0000_0000_0000;
const ENTERTAINMENT_BASE: u128 = 0x0e47_e474_0000_4000_8000_0000_0000_0000;
const CATERING_BASE: u128 = 0x0ca7_e000_0000_4000_8000_0000_0000_0000;
const ISSUE_BASE: u128 = 0x0155_0e00_0000_4000_8000_0000_0000_0000;
const OPTION_BASE: u128 = 0x0077_1040_0000_4000_8000_0000_0000_0000;

fn seed_id(base: u128, index: u128) -> Uuid {
    Uuid::from_u128(base + index)
}

/// Every entry of the default catalog.
#[derive(Debug, Clone)]
pub struct CatalogSeed {
    /// Client briefs.
    pub briefs: Vec<Brief>,
    /// Venues.
    pub venues: Vec<Venue>,
    /// Concepts.
    pub concepts: Vec<Concept>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Entertainment acts.
    pub entertainments: Vec<Entertainment>,
    /// Catering offers.
    pub caterings: Vec<Catering>,
    /// Unexpected issues with their options.
    pub issues: Vec<UnexpectedIssue>,
}

/// Builds the default catalog.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a seed entry is malformed.
#[allow(clippy::too_many_lines)]
pub fn default_catalog() -> Result<CatalogSeed, DomainError> {
    let briefs = vec![
        Brief::new(
            seed_id(BRIEF_BASE, 1),
            "Corporate Anniversary",
            "A 25th anniversary celebration for a major tech company. They want something memorable and innovative.",
            50_000,
        )?,
        Brief::new(
            seed_id(BRIEF_BASE, 2),
            "Product Launch",
            "A high-profile launch event for a revolutionary new consumer product. Needs to generate buzz and media attention.",
            75_000,
        )?,
        Brief::new(
            seed_id(BRIEF_BASE, 3),
            "Charity Gala",
            "An annual fundraising gala for a well-known environmental charity. Needs to be elegant but environmentally conscious.",
            60_000,
        )?,
    ];

    let venues = vec![
        Venue::new(
            seed_id(VENUE_BASE, 1),
            "Grand Ballroom",
            "A luxurious hotel ballroom with crystal chandeliers and marble floors. Can accommodate up to 500 guests.",
            15_000,
        )?,
        Venue::new(
            seed_id(VENUE_BASE, 2),
            "Urban Warehouse",
            "A trendy converted industrial space with exposed brick and high ceilings.",
            8_000,
        )?,
        Venue::new(
            seed_id(VENUE_BASE, 3),
            "Botanical Gardens",
            "An outdoor venue with manicured gardens and a large glass conservatory.",
            12_000,
        )?,
        Venue::new(
            seed_id(VENUE_BASE, 4),
            "Skyline Rooftop",
            "A sleek rooftop venue with panoramic city views and indoor and outdoor spaces.",
            20_000,
        )?,
    ];

    let concepts = vec![
        Concept::new(
            seed_id(CONCEPT_BASE, 1),
            "Future Tech Expo",
            "An interactive technology showcase with VR/AR experiences and robot demonstrations.",
            25_000,
        )?,
        Concept::new(
            seed_id(CONCEPT_BASE, 2),
            "Elegant Masquerade",
            "A sophisticated masked ball with ornate decorations and period costumes.",
            18_000,
        )?,
        Concept::new(
            seed_id(CONCEPT_BASE, 3),
            "Sustainable Celebration",
            "An eco-friendly event with sustainable materials and farm-to-table catering.",
            15_000,
        )?,
        Concept::new(
            seed_id(CONCEPT_BASE, 4),
            "Global Street Market",
            "A multicultural experience with international food stalls, performers and artisan markets.",
            22_000,
        )?,
    ];

    let constraints = vec![
        Constraint::new(
            seed_id(CONSTRAINT_BASE, 1),
            "Accessibility Requirements",
            "Event must be fully accessible for guests with mobility issues.",
            4,
            3_000,
        )?,
        Constraint::new(
            seed_id(CONSTRAINT_BASE, 2),
            "Media Coverage",
            "Event will have media present and needs to accommodate camera crews and interviews.",
            6,
            5_000,
        )?,
        Constraint::new(
            seed_id(CONSTRAINT_BASE, 3),
            "CEO Allergies",
            "The CEO has severe nut allergies and all food must be nut-free.",
            2,
            1_000,
        )?,
        Constraint::new(
            seed_id(CONSTRAINT_BASE, 4),
            "Security Concerns",
            "High-profile guests require additional security measures and privacy.",
            8,
            7_000,
        )?,
    ];

    let entertainments = vec![
        Entertainment::new(
            seed_id(ENTERTAINMENT_BASE, 1),
            "Live Band",
            "A versatile 5-piece band that can play everything from jazz to current hits.",
            5_000,
            8,
        )?,
        Entertainment::new(
            seed_id(ENTERTAINMENT_BASE, 2),
            "Celebrity DJ",
            "A well-known DJ who can create the perfect atmosphere and keep guests dancing.",
            8_000,
            9,
        )?,
        Entertainment::new(
            seed_id(ENTERTAINMENT_BASE, 3),
            "Cirque Performers",
            "Acrobats, aerialists and other circus performers providing roaming entertainment.",
            6_500,
            10,
        )?,
        Entertainment::new(
            seed_id(ENTERTAINMENT_BASE, 4),
            "Interactive Tech Games",
            "High-tech gaming stations and interactive digital experiences for guests.",
            4_500,
            7,
        )?,
    ];

    let caterings = vec![
        Catering::new(
            seed_id(CATERING_BASE, 1),
            "Gourmet Food Stations",
            "Multiple chef-attended stations offering a variety of cuisines and dishes.",
            12_000,
            9,
        )?,
        Catering::new(
            seed_id(CATERING_BASE, 2),
            "Plated Fine Dining",
            "Elegant three-course meal with premium ingredients and wine pairings.",
            18_000,
            10,
        )?,
        Catering::new(
            seed_id(CATERING_BASE, 3),
            "International Buffet",
            "Self-service buffet featuring dishes from around the world.",
            10_000,
            7,
        )?,
        Catering::new(
            seed_id(CATERING_BASE, 4),
            "Trendy Food Trucks",
            "A selection of popular food trucks offering casual, trendy bites.",
            8_000,
            8,
        )?,
    ];

    let issue_specs: [(&str, &str, [(&str, &str, i64); 3]); 5] = [
        (
            "Weather Emergency",
            "A sudden severe weather warning has been issued for your event date.",
            [
                ("Move Indoors", "Quickly reorganize the event to move to an indoor venue.", -5_000),
                ("Provide Weather Protection", "Rent tents, umbrellas, and heating/cooling equipment.", -3_000),
                ("Reschedule", "Postpone the event to another date.", -8_000),
            ],
        ),
        (
            "Vendor Cancellation",
            "A key vendor has unexpectedly canceled at the last minute.",
            [
                ("Premium Replacement", "Hire a premium vendor at rush rates.", -4_000),
                ("Modify Plans", "Adjust the event to work without this vendor.", -1_000),
                ("DIY Solution", "Have your team handle the responsibilities in-house.", -2_000),
            ],
        ),
        (
            "Budget Cut",
            "The client has just informed you that the budget needs to be reduced by 20%.",
            [
                ("Downsize Event", "Reduce the scale and scope of the entire event.", -1_000),
                ("Cut Specific Elements", "Eliminate certain features but maintain the core experience.", -2_000),
                ("Find Sponsors", "Quickly secure sponsors to cover the budget gap.", 0),
            ],
        ),
        (
            "Celebrity Appearance",
            "A VIP has decided to attend, requiring last-minute accommodations.",
            [
                ("VIP Treatment", "Provide full VIP experience with security and amenities.", -6_000),
                ("Basic Accommodation", "Make reasonable adjustments without extravagance.", -2_000),
                ("Leverage for Publicity", "Use the appearance for event promotion and visibility.", 1_000),
            ],
        ),
        (
            "Technical Failure",
            "Major audiovisual equipment is malfunctioning just hours before the event.",
            [
                ("Emergency Rental", "Rent replacement equipment at premium rates.", -4_000),
                ("Backup Systems", "Switch to simpler backup equipment you already have.", -1_000),
                ("Redesign Program", "Modify the event to require less technical elements.", -2_000),
            ],
        ),
    ];

    let mut issues = Vec::with_capacity(issue_specs.len());
    let mut option_index: u128 = 0;
    for (issue_index, (name, description, option_specs)) in (1_u128..).zip(issue_specs) {
        let mut options = Vec::with_capacity(option_specs.len());
        for (option_name, option_description, budget_impact) in option_specs {
            option_index += 1;
            options.push(UnexpectedIssueOption::new(
                seed_id(OPTION_BASE, option_index),
                option_name,
                option_description,
                budget_impact,
            )?);
        }
        issues.push(UnexpectedIssue::new(
            seed_id(ISSUE_BASE, issue_index),
            name,
            description,
            options,
        )?);
    }

    Ok(CatalogSeed {
        briefs,
        venues,
        concepts,
        constraints,
        entertainments,
        caterings,
        issues,
    })
}

/// Counts of entries written by [`seed_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    /// Number of entries saved across all catalog types.
    pub entries: usize,
}

/// Writes the default catalog into the given repositories, replacing any
/// entries with the same ids.
///
/// # Errors
///
/// Returns the first repository error encountered.
pub async fn seed_catalog(repos: &CatalogRepositories) -> Result<SeedSummary, DomainError> {
    let seed = default_catalog()?;
    let mut summary = SeedSummary::default();

    for brief in seed.briefs {
        repos.briefs.save(brief).await?;
        summary.entries += 1;
    }
    for venue in seed.venues {
        repos.venues.save(venue).await?;
        summary.entries += 1;
    }
    for concept in seed.concepts {
        repos.concepts.save(concept).await?;
        summary.entries += 1;
    }
    for constraint in seed.constraints {
        repos.constraints.save(constraint).await?;
        summary.entries += 1;
    }
    for entertainment in seed.entertainments {
        repos.entertainments.save(entertainment).await?;
        summary.entries += 1;
    }
    for catering in seed.caterings {
        repos.caterings.save(catering).await?;
        summary.entries += 1;
    }
    for issue in seed.issues {
        repos.issues.save(issue).await?;
        summary.entries += 1;
    }

    info!(entries = summary.entries, "default catalog seeded");
    Ok(summary)
}
