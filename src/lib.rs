//! SkillMatch Algo - matching engine for the SkillMatch marketplace
//!
//! Scores specialists against SME projects (and projects against
//! specialists) and orders the results. The core is a pure function of
//! its inputs; the service layer around it loads candidate pools and
//! exposes them over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{calculate_match_score, rank, Matcher};
pub use models::{MatchResult, Project, ScoringWeights, SortKey, SpecialistProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.weights(), &ScoringWeights::default());
    }
}
