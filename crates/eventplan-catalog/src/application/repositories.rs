//! The set of catalog repositories a composition root wires together.

use std::sync::Arc;

use eventplan_core::repository::Repository;

use crate::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, Venue,
};

/// One repository per catalog entity type.
#[derive(Clone)]
pub struct CatalogRepositories {
    /// Brief repository.
    pub briefs: Arc<dyn Repository<Brief>>,
    /// Venue repository.
    pub venues: Arc<dyn Repository<Venue>>,
    /// Concept repository.
    pub concepts: Arc<dyn Repository<Concept>>,
    /// Constraint repository.
    pub constraints: Arc<dyn Repository<Constraint>>,
    /// Entertainment repository.
    pub entertainments: Arc<dyn Repository<Entertainment>>,
    /// Catering repository.
    pub caterings: Arc<dyn Repository<Catering>>,
    /// Unexpected issue repository.
    pub issues: Arc<dyn Repository<UnexpectedIssue>>,
}

impl std::fmt::Debug for CatalogRepositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogRepositories").finish_non_exhaustive()
    }
}
