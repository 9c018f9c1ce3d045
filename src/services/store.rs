use async_trait::async_trait;
use thiserror::Error;

use crate::core::{ProjectFilter, SpecialistFilter};
use crate::models::{Project, SpecialistProfile};

/// Errors that can occur while loading candidates
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Read-only access to the marketplace records the matcher consumes
///
/// Handlers receive an implementation through application state; the
/// matcher itself only ever sees the plain values returned here.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Project `project_id`, if it belongs to the SME owned by `user_id`
    async fn project_for_owner(&self, project_id: &str, user_id: &str) -> Result<Option<Project>, StoreError>;

    /// Specialist profile owned by `user_id`
    async fn specialist_for_user(&self, user_id: &str) -> Result<Option<SpecialistProfile>, StoreError>;

    /// Specialists matching `filter`, in storage order
    async fn specialists(&self, filter: &SpecialistFilter) -> Result<Vec<SpecialistProfile>, StoreError>;

    /// Projects matching `filter`, in storage order
    async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
