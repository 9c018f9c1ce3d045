use std::cmp::Ordering;

use crate::models::{MatchResult, Project, SortKey, SpecialistProfile};

/// Fields a candidate exposes to the non-relevance orderings
pub trait Rankable {
    /// Rating used by `SortKey::Rating`; `None` leaves the order unchanged
    fn rating(&self) -> Option<f64>;

    /// Price used by the price orderings; `None` leaves the order unchanged
    fn price(&self) -> Option<f64>;
}

impl Rankable for SpecialistProfile {
    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn price(&self) -> Option<f64> {
        Some(self.hourly_rate)
    }
}

impl Rankable for Project {
    fn rating(&self) -> Option<f64> {
        None
    }

    fn price(&self) -> Option<f64> {
        Some(self.budget_max)
    }
}

impl<T: Rankable> Rankable for MatchResult<T> {
    fn rating(&self) -> Option<f64> {
        self.candidate.rating()
    }

    fn price(&self) -> Option<f64> {
        self.candidate.price()
    }
}

/// Rank scored candidates.
///
/// Candidates are first ordered by descending match score. A non-relevance
/// key then reorders by its own field, so candidates tied on that field
/// stay in relevance order. All sorts are stable: ties keep input order.
pub fn rank<T: Rankable>(mut candidates: Vec<MatchResult<T>>, key: SortKey) -> Vec<MatchResult<T>> {
    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    sort_by_field(&mut candidates, key);
    candidates
}

/// Order unscored candidates (browse mode).
///
/// `SortKey::Relevance` has no score to order by and keeps input order.
pub fn order<T: Rankable>(mut candidates: Vec<T>, key: SortKey) -> Vec<T> {
    sort_by_field(&mut candidates, key);
    candidates
}

fn sort_by_field<T: Rankable>(candidates: &mut [T], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::Rating => candidates.sort_by(|a, b| compare(b.rating(), a.rating())),
        SortKey::PriceAsc => candidates.sort_by(|a, b| compare(a.price(), b.price())),
        SortKey::PriceDesc => candidates.sort_by(|a, b| compare(b.price(), a.price())),
    }
}

/// Total order over optional floats; missing values compare equal
#[inline]
fn compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerificationStatus;

    fn create_specialist(id: &str, hourly_rate: f64, rating: f64) -> SpecialistProfile {
        SpecialistProfile {
            id: id.to_string(),
            user_id: format!("user_{}", id),
            full_name: format!("Specialist {}", id),
            skills: vec![],
            expertise_areas: vec!["Tech".to_string()],
            hourly_rate,
            availability_status: true,
            rating,
            verification_status: VerificationStatus::Verified,
        }
    }

    fn scored(id: &str, score: u8, hourly_rate: f64, rating: f64) -> MatchResult<SpecialistProfile> {
        MatchResult {
            candidate: create_specialist(id, hourly_rate, rating),
            match_score: score,
        }
    }

    fn ids<T>(results: &[MatchResult<T>], id: impl Fn(&T) -> &str) -> Vec<String> {
        results.iter().map(|r| id(&r.candidate).to_string()).collect()
    }

    #[test]
    fn test_relevance_descending() {
        let ranked = rank(
            vec![scored("a", 40, 100.0, 4.0), scored("b", 90, 100.0, 4.0), scored("c", 65, 100.0, 4.0)],
            SortKey::Relevance,
        );
        assert_eq!(ids(&ranked, |s| s.id.as_str()), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_relevance_ties_keep_input_order() {
        let ranked = rank(
            vec![
                scored("first", 70, 100.0, 4.0),
                scored("top", 80, 100.0, 4.0),
                scored("second", 70, 90.0, 5.0),
                scored("third", 70, 80.0, 3.0),
            ],
            SortKey::Relevance,
        );
        assert_eq!(ids(&ranked, |s| s.id.as_str()), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_price_asc() {
        let ranked = rank(
            vec![scored("a", 50, 120.0, 4.0), scored("b", 50, 80.0, 4.0), scored("c", 50, 100.0, 4.0)],
            SortKey::PriceAsc,
        );
        let rates: Vec<f64> = ranked.iter().map(|r| r.candidate.hourly_rate).collect();
        assert_eq!(rates, vec![80.0, 100.0, 120.0]);
    }

    #[test]
    fn test_price_desc_overrides_relevance() {
        let ranked = rank(
            vec![scored("cheap", 95, 80.0, 4.0), scored("pricey", 10, 150.0, 4.0)],
            SortKey::PriceDesc,
        );
        assert_eq!(ids(&ranked, |s| s.id.as_str()), vec!["pricey", "cheap"]);
    }

    #[test]
    fn test_rating_ties_fall_back_to_relevance() {
        let ranked = rank(
            vec![
                scored("low", 30, 100.0, 4.8),
                scored("best", 60, 100.0, 5.0),
                scored("high", 90, 100.0, 4.8),
            ],
            SortKey::Rating,
        );
        assert_eq!(ids(&ranked, |s| s.id.as_str()), vec!["best", "high", "low"]);
    }

    #[test]
    fn test_nan_does_not_panic() {
        let ranked = rank(
            vec![scored("a", 50, f64::NAN, 4.0), scored("b", 50, 80.0, f64::NAN)],
            SortKey::PriceAsc,
        );
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_order_relevance_keeps_input_order() {
        let specialists = vec![
            create_specialist("x", 130.0, 4.8),
            create_specialist("y", 75.0, 4.6),
            create_specialist("z", 95.0, 5.0),
        ];
        let ordered = order(specialists.clone(), SortKey::Relevance);
        assert_eq!(ordered, specialists);

        let by_rating = order(specialists, SortKey::Rating);
        let ids: Vec<&str> = by_rating.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_projects_rating_key_keeps_relevance_order() {
        let project = |id: &str, budget_max: f64| Project {
            id: id.to_string(),
            sme_id: "sme".to_string(),
            title: id.to_string(),
            category: "Tech".to_string(),
            required_skills: vec![],
            budget_min: 0.0,
            budget_max,
            status: Default::default(),
        };
        let candidates = vec![
            MatchResult { candidate: project("p1", 5000.0), match_score: 40 },
            MatchResult { candidate: project("p2", 15000.0), match_score: 80 },
        ];

        let by_rating = rank(candidates.clone(), SortKey::Rating);
        assert_eq!(ids(&by_rating, |p| p.id.as_str()), vec!["p2", "p1"]);

        let by_price = rank(candidates, SortKey::PriceAsc);
        assert_eq!(ids(&by_price, |p| p.id.as_str()), vec!["p1", "p2"]);
    }
}
