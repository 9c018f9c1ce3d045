// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    MatchResult, Project, ProjectStatus, ScoringWeights, SortKey, SpecialistProfile,
    UnknownVariant, VerificationStatus,
};
pub use requests::{BrowseSpecialistsQuery, MatchQuery};
pub use responses::{ErrorResponse, HealthResponse};
