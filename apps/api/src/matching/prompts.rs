// Prompt text for match scoring.

use crate::llm_client::prompts::{or_not_specified, JSON_ONLY_INSTRUCTION};
use crate::models::job::JobPosting;
use crate::models::seeker::{Priorities, SeekerProfile};

pub const MATCH_SYSTEM_ROLE: &str =
    "You are an expert HR recruiter with deep knowledge of job matching.";

/// Full system prompt for scoring: recruiter role plus the JSON-only rule.
pub fn match_system() -> String {
    format!("{MATCH_SYSTEM_ROLE} {JSON_ONLY_INSTRUCTION}")
}

/// Renders priorities as `"salary: 4/5, work life balance: 3/5"`.
pub fn format_priorities(priorities: &Priorities) -> String {
    if priorities.is_empty() {
        return "No specific priorities".to_string();
    }

    priorities
        .iter()
        .map(|(dimension, value)| format!("{}: {value}/5", dimension.key().replace('_', " ")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_match_prompt(seeker: &SeekerProfile, job: &JobPosting) -> String {
    format!(
        r#"Analyze compatibility between job seeker and job posting.
Consider seeker's priorities: {priorities}

Job Seeker Profile:
- Skills: {skills}
- Experience: {years} years
- Education: {education}
- Location: {seeker_location}

Job Posting:
- Title: {title}
- Requirements: {requirements}
- Description: {description}
- Location: {job_location}
- Remote Option: {remote}

Return JSON: {{"match_score": 0-100, "reasoning": "detailed explanation"}}"#,
        priorities = format_priorities(&seeker.priorities),
        skills = seeker.skills,
        years = seeker.experience_years,
        education = or_not_specified(&seeker.education),
        seeker_location = or_not_specified(&seeker.location),
        title = job.title,
        requirements = job.requirements,
        description = job.description,
        job_location = or_not_specified(&job.location),
        remote = if job.remote_option { "Yes" } else { "No" },
    )
}
