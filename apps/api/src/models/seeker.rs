use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// The fixed set of things a seeker can weight when judging a job.
/// Declaration order is the order priorities are presented in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityDimension {
    Salary,
    WorkLifeBalance,
    RemoteWork,
    CareerGrowth,
    CompanyCulture,
    JobSecurity,
    Location,
    Benefits,
    CompanyReputation,
    JobSatisfaction,
}

impl PriorityDimension {
    pub const ALL: [PriorityDimension; 10] = [
        PriorityDimension::Salary,
        PriorityDimension::WorkLifeBalance,
        PriorityDimension::RemoteWork,
        PriorityDimension::CareerGrowth,
        PriorityDimension::CompanyCulture,
        PriorityDimension::JobSecurity,
        PriorityDimension::Location,
        PriorityDimension::Benefits,
        PriorityDimension::CompanyReputation,
        PriorityDimension::JobSatisfaction,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PriorityDimension::Salary => "salary",
            PriorityDimension::WorkLifeBalance => "work_life_balance",
            PriorityDimension::RemoteWork => "remote_work",
            PriorityDimension::CareerGrowth => "career_growth",
            PriorityDimension::CompanyCulture => "company_culture",
            PriorityDimension::JobSecurity => "job_security",
            PriorityDimension::Location => "location",
            PriorityDimension::Benefits => "benefits",
            PriorityDimension::CompanyReputation => "company_reputation",
            PriorityDimension::JobSatisfaction => "job_satisfaction",
        }
    }
}

pub const DEFAULT_PRIORITY: u8 = 3;
pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// Seeker priorities, 1–5 per dimension. A dimension never set reads as 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priorities(BTreeMap<PriorityDimension, u8>);

impl Priorities {
    pub fn get(&self, dimension: PriorityDimension) -> u8 {
        self.0.get(&dimension).copied().unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn set(&mut self, dimension: PriorityDimension, value: u8) {
        self.0.insert(dimension, value.clamp(MIN_PRIORITY, MAX_PRIORITY));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Explicitly set dimensions, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PriorityDimension, u8)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeekerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub resume_text: Option<String>,
    pub resume_s3_key: Option<String>,
    pub skills: String,
    pub experience_years: i32,
    pub education: String,
    pub location: String,
    pub phone: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub bio: String,
    pub priorities: Json<Priorities>,
    pub preferred_job_types: Vec<String>,
    pub remote_work_preference: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeekerRow {
    /// A seeker with neither a résumé nor listed skills has nothing to match on.
    pub fn is_matchable(&self) -> bool {
        let has_resume = self
            .resume_text
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        has_resume || !self.skills.trim().is_empty()
    }

    pub fn profile(&self) -> SeekerProfile {
        SeekerProfile {
            skills: self.skills.clone(),
            experience_years: u32::try_from(self.experience_years).unwrap_or(0),
            education: self.education.clone(),
            location: self.location.clone(),
            priorities: self.priorities.0.clone(),
        }
    }
}

/// The slice of a seeker that scoring and advice read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeekerProfile {
    /// Free-text, comma/space-delimited skill list.
    pub skills: String,
    pub experience_years: u32,
    pub education: String,
    pub location: String,
    pub priorities: Priorities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_priority_defaults_to_three() {
        let priorities = Priorities::default();
        assert_eq!(priorities.get(PriorityDimension::Salary), 3);
    }

    #[test]
    fn test_priority_set_clamps_to_range() {
        let mut priorities = Priorities::default();
        priorities.set(PriorityDimension::Benefits, 9);
        priorities.set(PriorityDimension::Salary, 0);
        assert_eq!(priorities.get(PriorityDimension::Benefits), 5);
        assert_eq!(priorities.get(PriorityDimension::Salary), 1);
    }

    #[test]
    fn test_priorities_deserialize_from_stored_json() {
        let priorities: Priorities =
            serde_json::from_str(r#"{"work_life_balance": 5, "salary": 2}"#).unwrap();
        assert_eq!(priorities.get(PriorityDimension::WorkLifeBalance), 5);
        assert_eq!(priorities.get(PriorityDimension::Salary), 2);
        assert_eq!(priorities.get(PriorityDimension::JobSecurity), 3);
        // BTreeMap iteration follows declaration order, not insertion order.
        let order: Vec<_> = priorities.iter().map(|(d, _)| d).collect();
        assert_eq!(
            order,
            vec![PriorityDimension::Salary, PriorityDimension::WorkLifeBalance]
        );
    }

    #[test]
    fn test_dimension_key_matches_serde_name() {
        for dimension in PriorityDimension::ALL {
            let json = serde_json::to_string(&dimension).unwrap();
            assert_eq!(json, format!("\"{}\"", dimension.key()));
        }
    }
}
