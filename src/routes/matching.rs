use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, Responder, ResponseError};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::core::{Matcher, ProjectFilter, SpecialistFilter};
use crate::models::{BrowseSpecialistsQuery, ErrorResponse, HealthResponse, MatchQuery, VerificationStatus};
use crate::services::{AuthError, AuthenticatedUser, CandidateStore, Role, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    pub matcher: Matcher,
    /// Verification states eligible for project matching and browse
    pub verification_states: Vec<VerificationStatus>,
}

/// Errors surfaced by the matching endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| {
            tracing::error!("{}: {}", context, source);
            ApiError::Store { context, source }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) => e.status_code(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Auth(e) = self {
            return e.error_response();
        }

        let status = self.status_code();
        let message = match self {
            ApiError::Validation(errors) => errors.to_string(),
            // The cause is logged, never sent to the client
            ApiError::Store { context, .. } => context.to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/matching")
                .route("/project/{project_id}", web::get().to(match_project))
                .route("/specialist/{specialist_id}", web::get().to(match_specialist))
                .route("/browse-specialists", web::get().to(browse_specialists)),
        );
}

/// Reject malformed query strings (unknown sort keys, non-numeric filters)
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    error::InternalError::from_response(
        err.to_string(),
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "invalid_query".to_string(),
            message: format!("Invalid query: {}", err),
            status_code: 400,
        }),
    )
    .into()
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank specialists for one of the caller's projects
///
/// GET /api/matching/project/{projectId}?sort=relevance|rating|price-asc|price-desc
async fn match_project(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, ApiError> {
    user.require_role(&[Role::Sme])?;
    let project_id = path.into_inner();

    let project = state
        .store
        .project_for_owner(&project_id, user.user_id())
        .await
        .map_err(ApiError::store("Matching failed"))?
        .ok_or(ApiError::NotFound("Project not found"))?;

    let filter = SpecialistFilter::for_project(&project, &state.verification_states);
    let pool = state
        .store
        .specialists(&filter)
        .await
        .map_err(ApiError::store("Matching failed"))?;

    tracing::debug!("Scoring {} specialists for project {}", pool.len(), project_id);

    let ranked = state
        .matcher
        .rank_specialists_for_project(&project, pool, query.sort);

    tracing::info!("Returning {} specialists for project {}", ranked.len(), project_id);

    Ok(HttpResponse::Ok().json(ranked))
}

/// Rank open projects for the caller's own specialist profile
///
/// GET /api/matching/specialist/{specialistId}?sort=...
async fn match_specialist(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, ApiError> {
    user.require_role(&[Role::Specialist])?;
    let specialist_id = path.into_inner();

    let specialist = state
        .store
        .specialist_for_user(user.user_id())
        .await
        .map_err(ApiError::store("Matching failed"))?
        .filter(|s| s.id == specialist_id)
        .ok_or(ApiError::NotFound("Specialist not found"))?;

    let filter = ProjectFilter::for_specialist(&specialist);
    let pool = state
        .store
        .projects(&filter)
        .await
        .map_err(ApiError::store("Matching failed"))?;

    tracing::debug!("Scoring {} projects for specialist {}", pool.len(), specialist_id);

    let ranked = state
        .matcher
        .rank_projects_for_specialist(&specialist, pool, query.sort);

    tracing::info!("Returning {} projects for specialist {}", ranked.len(), specialist_id);

    Ok(HttpResponse::Ok().json(ranked))
}

/// Browse specialists without a project to score against
///
/// GET /api/matching/browse-specialists?category=&minRating=&maxRate=&available=&sort=
async fn browse_specialists(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    query: web::Query<BrowseSpecialistsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let filter = SpecialistFilter::for_browse(&query, &state.verification_states);
    let pool = state
        .store
        .specialists(&filter)
        .await
        .map_err(ApiError::store("Failed to fetch specialists"))?;

    let ordered = state.matcher.browse_specialists(pool, query.sort);

    tracing::debug!("Browse returned {} specialists", ordered.len());

    Ok(HttpResponse::Ok().json(ordered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_response() {
        let err = ApiError::NotFound("Project not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Project not found");
    }

    #[test]
    fn test_auth_error_passthrough() {
        let err = ApiError::from(AuthError::Forbidden);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_store_error_is_500() {
        let err = ApiError::store("Matching failed")(StoreError::InvalidRow("status".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Matching failed");
    }

    #[actix_web::test]
    async fn test_store_error_body_hides_cause() {
        let err = ApiError::store("Matching failed")(StoreError::InvalidRow(
            "password authentication failed for user \"admin\"".to_string(),
        ));

        let resp = err.error_response();
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(body.error, "Matching failed");
        assert_eq!(body.message, "Matching failed");
        assert_eq!(body.status_code, 500);
    }
}
