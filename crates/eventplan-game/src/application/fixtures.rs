//! Catalog fixtures and an in-memory game repository for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_catalog::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, UnexpectedIssueOption,
    Venue,
};
use eventplan_core::aggregate::AggregateRoot;
use eventplan_core::clock::Clock;
use eventplan_core::error::DomainError;
use eventplan_core::repository::Entity;
use eventplan_test_support::RecordingRepository;
use uuid::Uuid;

use crate::domain::aggregates::Game;
use crate::domain::repository::GameRepository;

/// One entry per catalog kind, plus two issues.
#[derive(Debug, Clone)]
pub(crate) struct CatalogFixture {
    pub brief: Brief,
    pub venue: Venue,
    pub concept: Concept,
    pub constraint: Constraint,
    pub entertainment: Entertainment,
    pub catering: Catering,
    pub issue: UnexpectedIssue,
    pub second_issue: UnexpectedIssue,
}

fn issue(name: &str, impacts: &[i64]) -> UnexpectedIssue {
    let options = impacts
        .iter()
        .enumerate()
        .map(|(index, impact)| {
            UnexpectedIssueOption::new(
                Uuid::new_v4(),
                format!("{name} option {index}"),
                "Handle it",
                *impact,
            )
            .unwrap()
        })
        .collect();
    UnexpectedIssue::new(Uuid::new_v4(), name, "Something went wrong", options).unwrap()
}

/// Brief budget 10 000; factors chosen so a 7 000 budget with the gambling
/// strategy scores 11.
pub(crate) fn scoring_catalog() -> CatalogFixture {
    CatalogFixture {
        brief: Brief::new(Uuid::new_v4(), "Gala", "Charity gala", 10_000).unwrap(),
        venue: Venue::new(Uuid::new_v4(), "Loft", "Industrial loft", 2_000).unwrap(),
        concept: Concept::new(Uuid::new_v4(), "Retro", "Back to the eighties", 3_000).unwrap(),
        constraint: Constraint::new(Uuid::new_v4(), "Green", "Zero waste", 5, 1_000).unwrap(),
        entertainment: Entertainment::new(Uuid::new_v4(), "DJ", "Vinyl only", 1_000, 8).unwrap(),
        catering: Catering::new(Uuid::new_v4(), "Buffet", "Local produce", 1_000, 9).unwrap(),
        issue: issue("Rain", &[-1_000, -500, 1_000]),
        second_issue: issue("Power cut", &[-2_000, -300]),
    }
}

/// Cheapest entries with the lowest impacts.
pub(crate) fn minimal_catalog() -> CatalogFixture {
    CatalogFixture {
        brief: Brief::new(Uuid::new_v4(), "Meetup", "Small meetup", 10_000).unwrap(),
        venue: Venue::new(Uuid::new_v4(), "Cafe", "Back room", 1_000).unwrap(),
        concept: Concept::new(Uuid::new_v4(), "Plain", "No theme", 1_000).unwrap(),
        constraint: Constraint::new(Uuid::new_v4(), "Quiet", "No amplification", 1, 1_000)
            .unwrap(),
        entertainment: Entertainment::new(Uuid::new_v4(), "Quiz", "Pub quiz", 500, 1).unwrap(),
        catering: Catering::new(Uuid::new_v4(), "Snacks", "Crisps", 500, 1).unwrap(),
        issue: issue("Late speaker", &[-200]),
        second_issue: issue("No chairs", &[-100, 0]),
    }
}

/// A game with every slot filled from `fixture` and its first issue resolved
/// with the first option.
pub(crate) fn played_game(fixture: &CatalogFixture, clock: &dyn Clock) -> Game {
    let option = &fixture.issue.options()[0];
    let game = Game::initialize(
        Uuid::new_v4(),
        Uuid::new_v4(),
        fixture.brief.budget(),
        clock,
    )
    .unwrap();
    game.select_brief(fixture.brief.id(), clock)
        .and_then(|g| g.select_venue(fixture.venue.id(), fixture.venue.cost(), clock))
        .and_then(|g| g.select_concept(fixture.concept.id(), fixture.concept.cost(), clock))
        .and_then(|g| g.select_constraint(fixture.constraint.id(), clock))
        .and_then(|g| {
            g.select_entertainment(
                fixture.entertainment.id(),
                fixture.entertainment.cost(),
                clock,
            )
        })
        .and_then(|g| g.select_catering(fixture.catering.id(), fixture.catering.cost(), clock))
        .and_then(|g| g.resolve_issue(fixture.issue.id(), option.id(), option.budget_impact(), clock))
        .unwrap()
}

/// Repositories preloaded with the fixture entries.
pub(crate) fn repositories(fixture: &CatalogFixture) -> CatalogRepositories {
    CatalogRepositories {
        briefs: Arc::new(RecordingRepository::new(vec![fixture.brief.clone()])),
        venues: Arc::new(RecordingRepository::new(vec![fixture.venue.clone()])),
        concepts: Arc::new(RecordingRepository::new(vec![fixture.concept.clone()])),
        constraints: Arc::new(RecordingRepository::new(vec![fixture.constraint.clone()])),
        entertainments: Arc::new(RecordingRepository::new(vec![
            fixture.entertainment.clone(),
        ])),
        caterings: Arc::new(RecordingRepository::new(vec![fixture.catering.clone()])),
        issues: Arc::new(RecordingRepository::new(vec![
            fixture.issue.clone(),
            fixture.second_issue.clone(),
        ])),
    }
}

/// Version-checked game store that also counts saves.
#[derive(Debug, Default)]
pub(crate) struct TestGameRepository {
    games: Mutex<Vec<Game>>,
    saves: Mutex<usize>,
}

impl TestGameRepository {
    pub(crate) fn with_game(game: Game) -> Self {
        Self {
            games: Mutex::new(vec![game]),
            saves: Mutex::new(0),
        }
    }

    pub(crate) fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub(crate) fn stored(&self, id: Uuid) -> Option<Game> {
        self.games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id() == id)
            .cloned()
    }
}

#[async_trait]
impl GameRepository for TestGameRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.stored(id))
    }

    async fn find_all(&self) -> Result<Vec<Game>, DomainError> {
        Ok(self.games.lock().unwrap().clone())
    }

    async fn find_active_by_player_id(
        &self,
        player_id: Uuid,
    ) -> Result<Option<Game>, DomainError> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.player_id() == player_id && !g.is_completed())
            .cloned())
    }

    async fn save(&self, game: &Game) -> Result<Game, DomainError> {
        let mut games = self.games.lock().unwrap();
        let current = games
            .iter()
            .find(|g| g.id() == game.id())
            .map_or(0, AggregateRoot::version);
        if current != game.version() {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id: game.id(),
                expected: game.version(),
                actual: current,
            });
        }
        let saved = game.clone().with_version(current + 1);
        games.retain(|g| g.id() != game.id());
        games.push(saved.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut games = self.games.lock().unwrap();
        let before = games.len();
        games.retain(|g| g.id() != id);
        Ok(games.len() != before)
    }
}
