use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::SortKey;

/// Query string for the project/specialist matching endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub sort: SortKey,
}

/// Query string for browse mode
///
/// GET /api/matching/browse-specialists?category=Tech&minRating=4.5&maxRate=120&available=true&sort=rating
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BrowseSpecialistsQuery {
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "minRating")]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxRate")]
    pub max_rate: Option<f64>,
    pub available: Option<bool>,
    #[serde(default)]
    pub sort: SortKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_out_of_range_rejected() {
        let query = BrowseSpecialistsQuery {
            min_rating: Some(6.0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let query = BrowseSpecialistsQuery {
            max_rate: Some(-1.0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_empty_query_is_valid() {
        assert!(BrowseSpecialistsQuery::default().validate().is_ok());
    }
}
