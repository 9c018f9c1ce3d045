use async_trait::async_trait;
use std::collections::HashMap;

use crate::core::{matches_project_filter, matches_specialist_filter, ProjectFilter, SpecialistFilter};
use crate::models::{Project, ProjectStatus, SpecialistProfile, VerificationStatus};
use crate::services::store::{CandidateStore, StoreError};

/// In-memory candidate store
///
/// Backs tests and local development. Insertion order is storage order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// SME profile id -> owning user id
    sme_owners: HashMap<String, String>,
    specialists: Vec<SpecialistProfile>,
    projects: Vec<Project>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sme(&mut self, sme_id: impl Into<String>, user_id: impl Into<String>) -> &mut Self {
        self.sme_owners.insert(sme_id.into(), user_id.into());
        self
    }

    pub fn add_specialist(&mut self, specialist: SpecialistProfile) -> &mut Self {
        self.specialists.push(specialist);
        self
    }

    pub fn add_project(&mut self, project: Project) -> &mut Self {
        self.projects.push(project);
        self
    }

    /// Demo marketplace: 3 SMEs, 15 specialists across 5 categories, 10 open projects
    pub fn with_demo_data() -> Self {
        let mut store = Self::new();

        for i in 1..=3 {
            store.add_sme(format!("sme_{}", i), format!("sme_user_{}", i));
        }

        let specialists: [(&str, &str, &[&str], f64, f64); 15] = [
            ("Sarah Chen", "Design", &["UI/UX", "Figma", "Branding"], 85.0, 4.9),
            ("Marcus Johnson", "Marketing", &["SEO", "Content", "Social Media"], 95.0, 4.8),
            ("Elena Rodriguez", "Tech", &["React", "Node.js", "API"], 120.0, 5.0),
            ("David Park", "Operations", &["Process", "Logistics", "Supply Chain"], 90.0, 4.7),
            ("Amanda Foster", "Finance", &["Accounting", "Budgeting", "Reporting"], 110.0, 4.9),
            ("James Wilson", "Tech", &["Python", "ML", "Data"], 130.0, 4.8),
            ("Lisa Kim", "Design", &["Graphics", "Illustration", "Web Design"], 75.0, 4.6),
            ("Robert Brown", "Marketing", &["PPC", "Analytics", "Growth"], 100.0, 4.7),
            ("Emma Davis", "Tech", &["DevOps", "Cloud", "AWS"], 115.0, 4.8),
            ("Chris Martin", "Operations", &["Project Mgmt", "Agile", "Teams"], 85.0, 4.9),
            ("Julia Lee", "Finance", &["Tax", "Audit", "Compliance"], 125.0, 5.0),
            ("Michael Torres", "Design", &["Product Design", "Prototyping"], 95.0, 4.8),
            ("Rachel Green", "Marketing", &["Email", "Automation", "CRM"], 88.0, 4.6),
            ("Alex Thompson", "Tech", &["Mobile", "React Native", "Flutter"], 105.0, 4.7),
            ("Sophie Anderson", "Operations", &["HR", "Talent", "Onboarding"], 80.0, 4.8),
        ];

        for (i, (name, expertise, skills, rate, rating)) in specialists.into_iter().enumerate() {
            store.add_specialist(SpecialistProfile {
                id: format!("specialist_{}", i + 1),
                user_id: format!("specialist_user_{}", i + 1),
                full_name: name.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                expertise_areas: vec![expertise.to_string()],
                hourly_rate: rate,
                availability_status: i % 4 != 0,
                rating,
                verification_status: if i < 12 {
                    VerificationStatus::Verified
                } else {
                    VerificationStatus::Pending
                },
            });
        }

        let projects: [(&str, &str, f64, f64, &[&str]); 10] = [
            ("Website Redesign", "Design", 2000.0, 5000.0, &["UI/UX", "Figma", "Web Design"]),
            ("SEO Campaign", "Marketing", 1500.0, 3000.0, &["SEO", "Content"]),
            ("E-commerce API", "Tech", 5000.0, 10000.0, &["React", "Node.js", "API"]),
            ("Process Optimization", "Operations", 2500.0, 5000.0, &["Process", "Operations"]),
            ("Financial Audit Prep", "Finance", 3000.0, 6000.0, &["Accounting", "Audit"]),
            ("Brand Identity", "Design", 1000.0, 2500.0, &["Branding", "Graphics"]),
            ("Social Media Strategy", "Marketing", 800.0, 2000.0, &["Social Media", "Content"]),
            ("Mobile App MVP", "Tech", 8000.0, 15000.0, &["React Native", "Mobile"]),
            ("Inventory System", "Operations", 4000.0, 8000.0, &["Logistics", "Supply Chain"]),
            ("Budget Planning", "Finance", 2000.0, 4000.0, &["Budgeting", "Reporting"]),
        ];

        for (i, (title, category, min, max, skills)) in projects.into_iter().enumerate() {
            store.add_project(Project {
                id: format!("project_{}", i + 1),
                sme_id: format!("sme_{}", i % 3 + 1),
                title: title.to_string(),
                category: category.to_string(),
                required_skills: skills.iter().map(|s| s.to_string()).collect(),
                budget_min: min,
                budget_max: max,
                status: ProjectStatus::Open,
            });
        }

        store
    }
}

#[async_trait]
impl CandidateStore for InMemoryStore {
    async fn project_for_owner(&self, project_id: &str, user_id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self
            .projects
            .iter()
            .find(|p| {
                p.id == project_id
                    && self.sme_owners.get(&p.sme_id).map(String::as_str) == Some(user_id)
            })
            .cloned())
    }

    async fn specialist_for_user(&self, user_id: &str) -> Result<Option<SpecialistProfile>, StoreError> {
        Ok(self.specialists.iter().find(|s| s.user_id == user_id).cloned())
    }

    async fn specialists(&self, filter: &SpecialistFilter) -> Result<Vec<SpecialistProfile>, StoreError> {
        Ok(self
            .specialists
            .iter()
            .filter(|s| matches_specialist_filter(s, filter))
            .cloned()
            .collect())
    }

    async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        Ok(self
            .projects
            .iter()
            .filter(|p| matches_project_filter(p, filter))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_project_ownership() {
        let store = InMemoryStore::with_demo_data();

        // project_1 belongs to sme_1, owned by sme_user_1
        let owned = store.project_for_owner("project_1", "sme_user_1").await.unwrap();
        assert_eq!(owned.map(|p| p.title), Some("Website Redesign".to_string()));

        let foreign = store.project_for_owner("project_1", "sme_user_2").await.unwrap();
        assert!(foreign.is_none());
    }

    #[actix_web::test]
    async fn test_specialist_pool_for_category() {
        let store = InMemoryStore::with_demo_data();
        let filter = SpecialistFilter {
            expertise_any: vec!["Tech".to_string()],
            ..Default::default()
        };

        let tech = store.specialists(&filter).await.unwrap();
        let names: Vec<&str> = tech.iter().map(|s| s.full_name.as_str()).collect();

        assert_eq!(names, vec!["Elena Rodriguez", "James Wilson", "Emma Davis", "Alex Thompson"]);
    }

    #[actix_web::test]
    async fn test_specialist_lookup_by_user() {
        let store = InMemoryStore::with_demo_data();

        let found = store.specialist_for_user("specialist_user_3").await.unwrap();
        assert_eq!(found.map(|s| s.id), Some("specialist_3".to_string()));
        assert!(store.specialist_for_user("nobody").await.unwrap().is_none());
    }
}
