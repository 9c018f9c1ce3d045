use crate::models::{BrowseSpecialistsQuery, Project, ProjectStatus, SpecialistProfile, VerificationStatus};

/// Constraints defining a specialist candidate pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialistFilter {
    /// Specialist must list at least one of these expertise areas (empty = any)
    pub expertise_any: Vec<String>,
    /// Acceptable verification states (empty = any)
    pub verification_states: Vec<VerificationStatus>,
    pub min_rating: Option<f64>,
    pub max_rate: Option<f64>,
    pub available_only: bool,
}

impl SpecialistFilter {
    /// Pool for ranking specialists against a project: the project's
    /// category among their expertise areas, in an acceptable state.
    pub fn for_project(project: &Project, verification_states: &[VerificationStatus]) -> Self {
        Self {
            expertise_any: vec![project.category.clone()],
            verification_states: verification_states.to_vec(),
            ..Default::default()
        }
    }

    /// Pool for browse mode
    pub fn for_browse(query: &BrowseSpecialistsQuery, verification_states: &[VerificationStatus]) -> Self {
        Self {
            expertise_any: query.category.iter().cloned().collect(),
            verification_states: verification_states.to_vec(),
            min_rating: query.min_rating,
            max_rate: query.max_rate,
            available_only: query.available.unwrap_or(false),
        }
    }
}

/// Constraints defining a project candidate pool
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFilter {
    pub status: ProjectStatus,
    /// Project category must be one of these (empty = any)
    pub categories_any: Vec<String>,
}

impl ProjectFilter {
    /// Pool for ranking projects against a specialist: open projects in
    /// one of the specialist's expertise areas.
    pub fn for_specialist(specialist: &SpecialistProfile) -> Self {
        Self {
            status: ProjectStatus::Open,
            categories_any: specialist.expertise_areas.clone(),
        }
    }
}

/// Check if a specialist belongs to the filtered pool
#[inline]
pub fn matches_specialist_filter(profile: &SpecialistProfile, filter: &SpecialistFilter) -> bool {
    if !filter.expertise_any.is_empty()
        && !profile
            .expertise_areas
            .iter()
            .any(|area| filter.expertise_any.contains(area))
    {
        return false;
    }

    if !filter.verification_states.is_empty()
        && !filter.verification_states.contains(&profile.verification_status)
    {
        return false;
    }

    if let Some(min_rating) = filter.min_rating {
        if profile.rating < min_rating {
            return false;
        }
    }

    if let Some(max_rate) = filter.max_rate {
        if profile.hourly_rate > max_rate {
            return false;
        }
    }

    if filter.available_only && !profile.availability_status {
        return false;
    }

    true
}

/// Check if a project belongs to the filtered pool
#[inline]
pub fn matches_project_filter(project: &Project, filter: &ProjectFilter) -> bool {
    if project.status != filter.status {
        return false;
    }

    filter.categories_any.is_empty() || filter.categories_any.contains(&project.category)
}
