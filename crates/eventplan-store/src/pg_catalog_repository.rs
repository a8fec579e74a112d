//! `PostgreSQL` implementations of the catalog `Repository` trait.
//!
//! The six flat entry kinds share the `catalog_entries` table and are told
//! apart by `kind`; unexpected issues and their options live in two tables of
//! their own.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use eventplan_catalog::application::repositories::CatalogRepositories;
use eventplan_catalog::domain::entities::{
    Brief, Catering, Concept, Constraint, Entertainment, UnexpectedIssue, UnexpectedIssueOption,
    Venue,
};
use eventplan_core::error::DomainError;
use eventplan_core::repository::{Entity, Repository};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::schema::{
    CATALOG_ENTRIES_TABLE, CATALOG_ENTRY_COLUMNS, UNEXPECTED_ISSUE_OPTIONS_TABLE,
    UNEXPECTED_ISSUES_TABLE,
};

pub(crate) fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {e}"))
}

/// One row of `catalog_entries`.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Kind tag, e.g. `"venue"`.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Brief budget.
    pub budget: Option<i64>,
    /// Selection cost.
    pub cost: Option<i64>,
    /// Impact rating.
    pub impact: Option<i16>,
}

impl CatalogRow {
    fn base(id: Uuid, kind: &str, name: &str, description: &str) -> Self {
        Self {
            id,
            kind: kind.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            budget: None,
            cost: None,
            impact: None,
        }
    }

    fn required<V>(&self, column: &str, value: Option<V>) -> Result<V, DomainError> {
        value.ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "{} row {} has no {column}",
                self.kind, self.id
            ))
        })
    }

    fn impact_rating(&self) -> Result<u8, DomainError> {
        let impact = self.required("impact", self.impact)?;
        u8::try_from(impact).map_err(|_| {
            DomainError::Infrastructure(format!(
                "{} row {} has out-of-range impact {impact}",
                self.kind, self.id
            ))
        })
    }
}

/// Mapping between a flat catalog entity and its `catalog_entries` row.
pub trait CatalogRecord: Entity {
    /// Value of the `kind` column.
    const TAG: &'static str;

    /// Converts the entity into a row.
    fn to_row(&self) -> CatalogRow;

    /// Rebuilds the entity from a row, re-running its validation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` for a row missing a column, or
    /// the entity's validation error for an invalid stored value.
    fn from_row(row: CatalogRow) -> Result<Self, DomainError>;
}

impl CatalogRecord for Brief {
    const TAG: &'static str = "brief";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            budget: Some(self.budget()),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let budget = row.required("budget", row.budget)?;
        Brief::new(row.id, row.name, row.description, budget)
    }
}

impl CatalogRecord for Venue {
    const TAG: &'static str = "venue";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            cost: Some(self.cost()),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let cost = row.required("cost", row.cost)?;
        Venue::new(row.id, row.name, row.description, cost)
    }
}

impl CatalogRecord for Concept {
    const TAG: &'static str = "concept";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            cost: Some(self.cost()),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let cost = row.required("cost", row.cost)?;
        Concept::new(row.id, row.name, row.description, cost)
    }
}

impl CatalogRecord for Constraint {
    const TAG: &'static str = "constraint";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            cost: Some(self.cost()),
            impact: Some(i16::from(self.impact())),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let cost = row.required("cost", row.cost)?;
        let impact = row.impact_rating()?;
        Constraint::new(row.id, row.name, row.description, impact, cost)
    }
}

impl CatalogRecord for Entertainment {
    const TAG: &'static str = "entertainment";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            cost: Some(self.cost()),
            impact: Some(i16::from(self.impact())),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let cost = row.required("cost", row.cost)?;
        let impact = row.impact_rating()?;
        Entertainment::new(row.id, row.name, row.description, cost, impact)
    }
}

impl CatalogRecord for Catering {
    const TAG: &'static str = "catering";

    fn to_row(&self) -> CatalogRow {
        CatalogRow {
            cost: Some(self.cost()),
            impact: Some(i16::from(self.impact())),
            ..CatalogRow::base(self.id(), Self::TAG, self.name(), self.description())
        }
    }

    fn from_row(row: CatalogRow) -> Result<Self, DomainError> {
        let cost = row.required("cost", row.cost)?;
        let impact = row.impact_rating()?;
        Catering::new(row.id, row.name, row.description, cost, impact)
    }
}

/// PostgreSQL-backed repository for one flat catalog kind.
#[derive(Debug, Clone)]
pub struct PgCatalogRepository<T> {
    pool: PgPool,
    _kind: PhantomData<fn() -> T>,
}

impl<T: CatalogRecord> PgCatalogRepository<T> {
    /// Creates a new `PgCatalogRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }
}

#[async_trait]
impl<T: CatalogRecord> Repository<T> for PgCatalogRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError> {
        let row: Option<CatalogRow> = sqlx::query_as(&format!(
            "SELECT {CATALOG_ENTRY_COLUMNS} FROM {CATALOG_ENTRIES_TABLE} WHERE id = $1 AND kind = $2"
        ))
        .bind(id)
        .bind(T::TAG)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        row.map(T::from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<T>, DomainError> {
        let rows: Vec<CatalogRow> = sqlx::query_as(&format!(
            "SELECT {CATALOG_ENTRY_COLUMNS} FROM {CATALOG_ENTRIES_TABLE} WHERE kind = $1 ORDER BY name"
        ))
        .bind(T::TAG)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        rows.into_iter().map(T::from_row).collect()
    }

    async fn save(&self, entity: T) -> Result<T, DomainError> {
        let row = entity.to_row();
        sqlx::query(&format!(
            "INSERT INTO {CATALOG_ENTRIES_TABLE} ({CATALOG_ENTRY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET kind = EXCLUDED.kind, name = EXCLUDED.name, \
             description = EXCLUDED.description, budget = EXCLUDED.budget, \
             cost = EXCLUDED.cost, impact = EXCLUDED.impact"
        ))
        .bind(row.id)
        .bind(&row.kind)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.budget)
        .bind(row.cost)
        .bind(row.impact)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        debug!(kind = T::TAG, id = %row.id, "catalog entry saved");
        Ok(entity)
    }
}

#[derive(Debug, FromRow)]
struct IssueRow {
    id: Uuid,
    name: String,
    description: String,
}

#[derive(Debug, FromRow)]
struct OptionRow {
    id: Uuid,
    issue_id: Uuid,
    name: String,
    description: String,
    budget_impact: i64,
}

/// PostgreSQL-backed repository for unexpected issues and their options.
#[derive(Debug, Clone)]
pub struct PgIssueRepository {
    pool: PgPool,
}

impl PgIssueRepository {
    /// Creates a new `PgIssueRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn options_for(&self, issue_ids: &[Uuid]) -> Result<Vec<OptionRow>, DomainError> {
        sqlx::query_as(&format!(
            "SELECT id, issue_id, name, description, budget_impact \
             FROM {UNEXPECTED_ISSUE_OPTIONS_TABLE} \
             WHERE issue_id = ANY($1) ORDER BY issue_id, position"
        ))
        .bind(issue_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }
}

fn assemble(issue: IssueRow, options: &[OptionRow]) -> Result<UnexpectedIssue, DomainError> {
    let options = options
        .iter()
        .filter(|option| option.issue_id == issue.id)
        .map(|option| {
            UnexpectedIssueOption::new(
                option.id,
                option.name.as_str(),
                option.description.as_str(),
                option.budget_impact,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    UnexpectedIssue::new(issue.id, issue.name, issue.description, options)
}

#[async_trait]
impl Repository<UnexpectedIssue> for PgIssueRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UnexpectedIssue>, DomainError> {
        let issue: Option<IssueRow> = sqlx::query_as(&format!(
            "SELECT id, name, description FROM {UNEXPECTED_ISSUES_TABLE} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        let Some(issue) = issue else {
            return Ok(None);
        };
        let options = self.options_for(&[id]).await?;
        assemble(issue, &options).map(Some)
    }

    async fn find_all(&self) -> Result<Vec<UnexpectedIssue>, DomainError> {
        let issues: Vec<IssueRow> = sqlx::query_as(&format!(
            "SELECT id, name, description FROM {UNEXPECTED_ISSUES_TABLE} ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        let ids: Vec<Uuid> = issues.iter().map(|issue| issue.id).collect();
        let options = self.options_for(&ids).await?;
        issues
            .into_iter()
            .map(|issue| assemble(issue, &options))
            .collect()
    }

    async fn save(&self, entity: UnexpectedIssue) -> Result<UnexpectedIssue, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(&format!(
            "INSERT INTO {UNEXPECTED_ISSUES_TABLE} (id, name, description) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, description = EXCLUDED.description"
        ))
        .bind(entity.id())
        .bind(entity.name())
        .bind(entity.description())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query(&format!(
            "DELETE FROM {UNEXPECTED_ISSUE_OPTIONS_TABLE} WHERE issue_id = $1"
        ))
        .bind(entity.id())
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        for (position, option) in entity.options().iter().enumerate() {
            let position = i32::try_from(position).map_err(|_| {
                DomainError::Validation(format!("issue {} has too many options", entity.id()))
            })?;
            sqlx::query(&format!(
                "INSERT INTO {UNEXPECTED_ISSUE_OPTIONS_TABLE} \
                 (id, issue_id, position, name, description, budget_impact) \
                 VALUES ($1, $2, $3, $4, $5, $6)"
            ))
            .bind(option.id())
            .bind(entity.id())
            .bind(position)
            .bind(option.name())
            .bind(option.description())
            .bind(option.budget_impact())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        debug!(issue_id = %entity.id(), options = entity.options().len(), "unexpected issue saved");
        Ok(entity)
    }
}

/// PostgreSQL repositories for every catalog kind, sharing one pool.
#[must_use]
pub fn pg_catalog(pool: &PgPool) -> CatalogRepositories {
    CatalogRepositories {
        briefs: Arc::new(PgCatalogRepository::<Brief>::new(pool.clone())),
        venues: Arc::new(PgCatalogRepository::<Venue>::new(pool.clone())),
        concepts: Arc::new(PgCatalogRepository::<Concept>::new(pool.clone())),
        constraints: Arc::new(PgCatalogRepository::<Constraint>::new(pool.clone())),
        entertainments: Arc::new(PgCatalogRepository::<Entertainment>::new(pool.clone())),
        caterings: Arc::new(PgCatalogRepository::<Catering>::new(pool.clone())),
        issues: Arc::new(PgIssueRepository::new(pool.clone())),
    }
}
