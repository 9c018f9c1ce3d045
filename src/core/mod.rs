// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod scoring;

pub use filters::{matches_project_filter, matches_specialist_filter, ProjectFilter, SpecialistFilter};
pub use matcher::Matcher;
pub use ranking::{order, rank, Rankable};
pub use scoring::{calculate_match_score, score_breakdown, ScoreBreakdown};
