//! Read-only routes for the Catalog context.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use eventplan_catalog::application::query_handlers;
use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_catalog::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, Venue,
};
use eventplan_core::repository::{Entity, Repository};
use eventplan_core::validation::parse_id;
use serde::Serialize;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// A catalog entry type exposed under `/{PATH}`.
trait CatalogKind: Entity + Serialize {
    const PATH: &'static str;

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>>;

    fn sort_key(&self) -> &str;
}

impl CatalogKind for Brief {
    const PATH: &'static str = "briefs";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.briefs
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for Venue {
    const PATH: &'static str = "venues";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.venues
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for Concept {
    const PATH: &'static str = "concepts";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.concepts
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for Constraint {
    const PATH: &'static str = "constraints";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.constraints
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for Entertainment {
    const PATH: &'static str = "entertainments";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.entertainments
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for Catering {
    const PATH: &'static str = "caterings";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.caterings
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

impl CatalogKind for UnexpectedIssue {
    const PATH: &'static str = "issues";

    fn repository(catalog: &CatalogRepositories) -> &Arc<dyn Repository<Self>> {
        &catalog.issues
    }

    fn sort_key(&self) -> &str {
        self.name()
    }
}

/// GET /{kind}
#[instrument(skip(state), fields(kind = T::KIND))]
async fn list<T: CatalogKind>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError> {
    let entries =
        query_handlers::list_entries(T::repository(&state.catalog).as_ref(), T::sort_key).await?;
    Ok(Json(entries))
}

/// GET /{kind}/{id}
#[instrument(skip(state, id), fields(kind = T::KIND, id = %id))]
async fn entry<T: CatalogKind>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError> {
    let id = parse_id("id", &id)?;
    let entry = query_handlers::get_entry(id, T::repository(&state.catalog).as_ref()).await?;
    Ok(Json(entry))
}

fn with_kind<T: CatalogKind>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(&format!("/{}", T::PATH), get(list::<T>))
        .route(&format!("/{}/{{id}}", T::PATH), get(entry::<T>))
}

/// Returns the router for the catalog context.
pub fn router() -> Router<AppState> {
    let router = Router::new();
    let router = with_kind::<Brief>(router);
    let router = with_kind::<Venue>(router);
    let router = with_kind::<Concept>(router);
    let router = with_kind::<Constraint>(router);
    let router = with_kind::<Entertainment>(router);
    let router = with_kind::<Catering>(router);
    with_kind::<UnexpectedIssue>(router)
}
