use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;

use crate::core::{ProjectFilter, SpecialistFilter};
use crate::models::{Project, SpecialistProfile};
use crate::services::store::{CandidateStore, StoreError};

const SPECIALIST_COLUMNS: &str = r#"
    SELECT id, "userId", "fullName", skills, "expertiseAreas",
           "hourlyRate"::float8 AS "hourlyRate", "availabilityStatus",
           rating::float8 AS rating, "verificationStatus"
    FROM "SpecialistProfile"
"#;

const PROJECT_COLUMNS: &str = r#"
    SELECT p.id, p."smeId", p.title, p.category, p."requiredSkills",
           p."budgetMin"::float8 AS "budgetMin", p."budgetMax"::float8 AS "budgetMax", p.status
    FROM "Project" p
"#;

/// PostgreSQL-backed candidate store
///
/// Reads the marketplace tables owned by the main application. The
/// store never writes.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }
}

fn specialist_from_row(row: &PgRow) -> Result<SpecialistProfile, StoreError> {
    let status: String = row.try_get("verificationStatus")?;

    Ok(SpecialistProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        full_name: row.try_get("fullName")?,
        skills: row.try_get("skills")?,
        expertise_areas: row.try_get("expertiseAreas")?,
        hourly_rate: row.try_get("hourlyRate")?,
        availability_status: row.try_get("availabilityStatus")?,
        rating: row.try_get("rating")?,
        verification_status: status
            .parse()
            .map_err(|e| StoreError::InvalidRow(format!("verificationStatus: {}", e)))?,
    })
}

fn project_from_row(row: &PgRow) -> Result<Project, StoreError> {
    let status: String = row.try_get("status")?;

    Ok(Project {
        id: row.try_get("id")?,
        sme_id: row.try_get("smeId")?,
        title: row.try_get("title")?,
        category: row.try_get("category")?,
        required_skills: row.try_get("requiredSkills")?,
        budget_min: row.try_get("budgetMin")?,
        budget_max: row.try_get("budgetMax")?,
        status: status
            .parse()
            .map_err(|e| StoreError::InvalidRow(format!("status: {}", e)))?,
    })
}

/// Translate a specialist filter into SQL predicates
fn push_specialist_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &SpecialistFilter) {
    builder.push(" WHERE TRUE");

    if !filter.expertise_any.is_empty() {
        builder
            .push(r#" AND "expertiseAreas" && "#)
            .push_bind(filter.expertise_any.clone());
    }

    if !filter.verification_states.is_empty() {
        let states: Vec<String> = filter
            .verification_states
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        builder
            .push(r#" AND "verificationStatus" = ANY("#)
            .push_bind(states)
            .push(")");
    }

    if let Some(min_rating) = filter.min_rating {
        builder.push(" AND rating >= ").push_bind(min_rating);
    }

    if let Some(max_rate) = filter.max_rate {
        builder.push(r#" AND "hourlyRate" <= "#).push_bind(max_rate);
    }

    if filter.available_only {
        builder.push(r#" AND "availabilityStatus" = TRUE"#);
    }

    builder.push(r#" ORDER BY "createdAt", id"#);
}

/// Translate a project filter into SQL predicates
fn push_project_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProjectFilter) {
    builder
        .push(" WHERE p.status = ")
        .push_bind(filter.status.as_str());

    if !filter.categories_any.is_empty() {
        builder
            .push(" AND p.category = ANY(")
            .push_bind(filter.categories_any.clone())
            .push(")");
    }

    builder.push(r#" ORDER BY p."createdAt", p.id"#);
}

#[async_trait]
impl CandidateStore for PostgresStore {
    async fn project_for_owner(&self, project_id: &str, user_id: &str) -> Result<Option<Project>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(PROJECT_COLUMNS);
        builder
            .push(r#" JOIN "SMEProfile" s ON s.id = p."smeId" WHERE p.id = "#)
            .push_bind(project_id)
            .push(r#" AND s."userId" = "#)
            .push_bind(user_id);

        let row = builder.build().fetch_optional(&self.pool).await?;

        row.as_ref().map(project_from_row).transpose()
    }

    async fn specialist_for_user(&self, user_id: &str) -> Result<Option<SpecialistProfile>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(SPECIALIST_COLUMNS);
        builder.push(r#" WHERE "userId" = "#).push_bind(user_id);

        let row = builder.build().fetch_optional(&self.pool).await?;

        row.as_ref().map(specialist_from_row).transpose()
    }

    async fn specialists(&self, filter: &SpecialistFilter) -> Result<Vec<SpecialistProfile>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(SPECIALIST_COLUMNS);
        push_specialist_filter(&mut builder, filter);

        let rows = builder.build().fetch_all(&self.pool).await?;

        tracing::debug!("Loaded {} specialists", rows.len());

        rows.iter().map(specialist_from_row).collect()
    }

    async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(PROJECT_COLUMNS);
        push_project_filter(&mut builder, filter);

        let rows = builder.build().fetch_all(&self.pool).await?;

        tracing::debug!("Loaded {} projects", rows.len());

        rows.iter().map(project_from_row).collect()
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
