use crate::models::{Project, ScoringWeights, SpecialistProfile};

/// Fraction of the budget weight awarded when the rate is within 120% of the budget midpoint
const NEAR_FIT_RATIO: f64 = 0.6;
/// Fraction of the budget weight awarded when the rate is within 150% of the budget maximum
const STRETCH_RATIO: f64 = 0.32;
const NEAR_FIT_FACTOR: f64 = 1.2;
const STRETCH_FACTOR: f64 = 1.5;
const MAX_RATING: f64 = 5.0;

/// Per-component contributions to a match score, in points
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub budget: f64,
    pub availability: f64,
    pub industry: f64,
    pub rating: f64,
    /// Required skills the specialist covers, in project order
    pub matched_skills: Vec<String>,
}

impl ScoreBreakdown {
    /// Sum of all components, rounded and clamped to 0-100
    pub fn total(&self) -> u8 {
        let sum = self.skills + self.budget + self.availability + self.industry + self.rating;
        if !sum.is_finite() {
            return 0;
        }
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Calculate a match score (0-100) for a specialist against a project
///
/// Scoring formula (default weights):
/// score = (
///     skills_score           # 40, share of required skills covered
///     + budget_score         # 25 / 15 / 8 / 0 by budget fit tier
///     + availability_score   # 15 if available
///     + industry_score       # 10, only when the caller resolves it
///     + rating_score         # 10 * rating / 5, capped at 10
/// )
///
/// Industry alignment is not resolved here and contributes nothing.
pub fn calculate_match_score(
    project: &Project,
    specialist: &SpecialistProfile,
    weights: &ScoringWeights,
) -> u8 {
    score_breakdown(project, specialist, weights, None).total()
}

/// Score each component separately.
///
/// `industry_aligned` is a pre-resolved "specialist has worked in the
/// project's industry" signal; `None` awards nothing.
pub fn score_breakdown(
    project: &Project,
    specialist: &SpecialistProfile,
    weights: &ScoringWeights,
    industry_aligned: Option<bool>,
) -> ScoreBreakdown {
    let (skills, matched_skills) = calculate_skill_score(
        &project.required_skills,
        &specialist.skills,
        &specialist.expertise_areas,
        weights.skills,
    );

    let budget = calculate_budget_score(
        specialist.hourly_rate,
        project.budget_min,
        project.budget_max,
        weights.budget,
    );

    let availability = if specialist.availability_status {
        weights.availability
    } else {
        0.0
    };

    let industry = match industry_aligned {
        Some(true) => weights.industry,
        _ => 0.0,
    };

    let rating = calculate_rating_score(specialist.rating, weights.rating);

    ScoreBreakdown {
        skills,
        budget,
        availability,
        industry,
        rating,
        matched_skills,
    }
}

/// Skill overlap score.
///
/// A required skill counts as matched when any specialist skill or
/// expertise area contains it, or is contained by it, ignoring case.
/// No required skills earns half the weight.
fn calculate_skill_score(
    required: &[String],
    skills: &[String],
    expertise_areas: &[String],
    weight: f64,
) -> (f64, Vec<String>) {
    if required.is_empty() {
        return (weight / 2.0, Vec::new());
    }

    let offered: Vec<String> = skills
        .iter()
        .chain(expertise_areas)
        .map(|s| s.to_lowercase())
        .collect();

    let matched: Vec<String> = required
        .iter()
        .filter(|r| {
            let r = r.to_lowercase();
            offered
                .iter()
                .any(|s| s.contains(r.as_str()) || r.contains(s.as_str()))
        })
        .cloned()
        .collect();

    let ratio = matched.len() as f64 / required.len() as f64;
    (weight * ratio, matched)
}

/// Budget fit score, tiered so slightly-over-budget rates still score
#[inline]
fn calculate_budget_score(hourly_rate: f64, budget_min: f64, budget_max: f64, weight: f64) -> f64 {
    let mid = (budget_min + budget_max) / 2.0;

    if hourly_rate >= budget_min && hourly_rate <= budget_max {
        weight
    } else if hourly_rate <= mid * NEAR_FIT_FACTOR {
        weight * NEAR_FIT_RATIO
    } else if hourly_rate <= budget_max * STRETCH_FACTOR {
        weight * STRETCH_RATIO
    } else {
        0.0
    }
}

/// Rating score, linear in the 0-5 rating and capped at the weight.
/// Ratings outside 0-5 are not corrected here; NaN stays NaN.
#[inline]
fn calculate_rating_score(rating: f64, weight: f64) -> f64 {
    let score = (rating / MAX_RATING) * weight;
    if score > weight {
        weight
    } else {
        score
    }
}
