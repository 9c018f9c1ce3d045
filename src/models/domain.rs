use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project posted by an SME, as supplied by the candidate store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(rename = "smeId")]
    pub sme_id: String,
    pub title: String,
    pub category: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "budgetMin")]
    pub budget_min: f64,
    #[serde(rename = "budgetMax")]
    pub budget_max: f64,
    #[serde(default)]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(ProjectStatus::Open),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Independent specialist offering services to SMEs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistProfile {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "expertiseAreas", default)]
    pub expertise_areas: Vec<String>,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    #[serde(rename = "availabilityStatus", default)]
    pub availability_status: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "verificationStatus", default)]
    pub verification_status: VerificationStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Pending,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(VerificationStatus::Verified),
            "pending" => Ok(VerificationStatus::Pending),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// A status string that does not name any known variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// A candidate augmented with its match score.
///
/// Serializes as the candidate's own fields plus `matchScore`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult<T> {
    #[serde(flatten)]
    pub candidate: T,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
}

/// Ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "relevance")]
    Relevance,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
}

/// Scoring weights, in points out of 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub budget: f64,
    pub availability: f64,
    pub industry: f64,
    pub rating: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.budget + self.availability + self.industry + self.rating
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            budget: 25.0,
            availability: 15.0,
            industry: 10.0,
            rating: 10.0,
        }
    }
}
