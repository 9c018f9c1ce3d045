use crate::models::{MatchResult, Project, ScoringWeights, SortKey, SpecialistProfile};
use crate::core::{
    ranking::{order, rank},
    scoring::calculate_match_score,
};

/// Scores and orders candidate pools supplied by the caller
///
/// # Call shapes
/// 1. Specialists for a project (scored, ranked)
/// 2. Projects for a specialist (scored, ranked)
/// 3. Browse specialists without a project (ordered only)
///
/// Pools arrive already filtered; the matcher never drops a candidate.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score every specialist in the pool against `project` and rank them
    pub fn rank_specialists_for_project(
        &self,
        project: &Project,
        specialists: Vec<SpecialistProfile>,
        sort: SortKey,
    ) -> Vec<MatchResult<SpecialistProfile>> {
        let scored = specialists
            .into_iter()
            .map(|specialist| MatchResult {
                match_score: calculate_match_score(project, &specialist, &self.weights),
                candidate: specialist,
            })
            .collect();

        rank(scored, sort)
    }

    /// Score every project in the pool against `specialist` and rank them
    pub fn rank_projects_for_specialist(
        &self,
        specialist: &SpecialistProfile,
        projects: Vec<Project>,
        sort: SortKey,
    ) -> Vec<MatchResult<Project>> {
        let scored = projects
            .into_iter()
            .map(|project| MatchResult {
                match_score: calculate_match_score(&project, specialist, &self.weights),
                candidate: project,
            })
            .collect();

        rank(scored, sort)
    }

    /// Order a specialist pool with no project to score against
    pub fn browse_specialists(
        &self,
        specialists: Vec<SpecialistProfile>,
        sort: SortKey,
    ) -> Vec<SpecialistProfile> {
        order(specialists, sort)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectStatus, VerificationStatus};

    fn create_candidate(id: &str, skills: &[&str], rate: f64, available: bool, rating: f64) -> SpecialistProfile {
        SpecialistProfile {
            id: id.to_string(),
            user_id: format!("user_{}", id),
            full_name: format!("Specialist {}", id),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            expertise_areas: vec!["Tech".to_string()],
            hourly_rate: rate,
            availability_status: available,
            rating,
            verification_status: VerificationStatus::Verified,
        }
    }

    fn create_project(id: &str, skills: &[&str], budget_min: f64, budget_max: f64) -> Project {
        Project {
            id: id.to_string(),
            sme_id: "sme_1".to_string(),
            title: format!("Project {}", id),
            category: "Tech".to_string(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            budget_min,
            budget_max,
            status: ProjectStatus::Open,
        }
    }

    #[test]
    fn test_specialists_ranked_by_score() {
        let matcher = Matcher::with_default_weights();
        let project = create_project("1", &["React", "Node.js", "API"], 100.0, 130.0);

        let candidates = vec![
            create_candidate("partial", &["React"], 120.0, true, 4.5),
            create_candidate("full", &["React", "Node.js", "API"], 120.0, true, 5.0),
            create_candidate("none", &["Figma"], 300.0, false, 3.0),
        ];

        let result = matcher.rank_specialists_for_project(&project, candidates, SortKey::Relevance);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].candidate.id, "full");
        assert_eq!(result[0].match_score, 90);
        assert_eq!(result[2].candidate.id, "none");
        for pair in result.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_projects_ranked_for_specialist() {
        let matcher = Matcher::with_default_weights();
        let specialist = create_candidate("s", &["React", "Node.js", "API"], 120.0, true, 5.0);

        let projects = vec![
            create_project("over_budget", &["React"], 50.0, 60.0),
            create_project("fit", &["React", "API"], 100.0, 150.0),
        ];

        let result = matcher.rank_projects_for_specialist(&specialist, projects, SortKey::Relevance);

        assert_eq!(result[0].candidate.id, "fit");
        assert_eq!(result[0].match_score, 90);
        // 40 + 0 (120 > 60 * 1.5) + 15 + 10
        assert_eq!(result[1].match_score, 65);
    }

    #[test]
    fn test_browse_does_not_score() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("a", &[], 120.0, true, 4.0),
            create_candidate("b", &[], 80.0, true, 4.0),
        ];

        let result = matcher.browse_specialists(candidates, SortKey::PriceAsc);

        assert_eq!(result[0].id, "b");
        assert_eq!(result[1].id, "a");
    }

    #[test]
    fn test_deterministic() {
        let matcher = Matcher::with_default_weights();
        let project = create_project("1", &["React"], 80.0, 120.0);
        let candidates: Vec<SpecialistProfile> = (0..20)
            .map(|i| create_candidate(&i.to_string(), &["React"], 60.0 + i as f64 * 5.0, i % 2 == 0, 4.0))
            .collect();

        let first = matcher.rank_specialists_for_project(&project, candidates.clone(), SortKey::Relevance);
        let second = matcher.rank_specialists_for_project(&project, candidates, SortKey::Relevance);

        assert_eq!(first, second);
    }
}
