//! Skill Extractor: pulls a flat skill list out of résumé text.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{complete_json, LlmError, ReasoningService, ResultSource};
use crate::skills::prompts::{build_skills_prompt, skills_system};

/// Reference list scanned when the reasoning service is unavailable.
pub const FALLBACK_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "SQL",
    "HTML",
    "CSS",
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Management",
];

/// Returned by the keyword scan when nothing in the list matches.
pub const NO_SKILLS_PLACEHOLDER: &str = "General Skills";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillExtraction {
    pub skills: Vec<String>,
    pub backend: ResultSource,
}

#[derive(Debug, Deserialize)]
struct LlmSkillsReply {
    technical_skills: Vec<String>,
    soft_skills: Vec<String>,
}

/// Extracts skills from `text`.
///
/// Empty (or whitespace-only) text yields an empty list without consulting
/// either path. Otherwise the reasoning service is asked first and the
/// keyword scan answers on any failure, so the result is never empty.
pub async fn extract_skills(text: &str, llm: &dyn ReasoningService) -> SkillExtraction {
    if text.trim().is_empty() {
        return SkillExtraction {
            skills: vec![],
            backend: ResultSource::Fallback,
        };
    }

    match extract_with_llm(text, llm).await {
        Ok(skills) => SkillExtraction {
            skills,
            backend: ResultSource::Llm,
        },
        Err(LlmError::NotConfigured) => {
            debug!("Reasoning service not configured; using keyword skill scan");
            keyword_extraction(text)
        }
        Err(e) => {
            warn!("AI skill extraction failed, using keyword skill scan: {e}");
            keyword_extraction(text)
        }
    }
}

async fn extract_with_llm(text: &str, llm: &dyn ReasoningService) -> Result<Vec<String>, LlmError> {
    let reply: LlmSkillsReply =
        complete_json(llm, &build_skills_prompt(text), &skills_system()).await?;

    Ok(reply
        .technical_skills
        .into_iter()
        .chain(reply.soft_skills)
        .collect())
}

fn keyword_extraction(text: &str) -> SkillExtraction {
    SkillExtraction {
        skills: keyword_skills(text),
        backend: ResultSource::Fallback,
    }
}

/// Case-insensitive substring scan over `FALLBACK_SKILLS`, in list order.
/// Never empty: no hits yields the placeholder.
pub fn keyword_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let found: Vec<String> = FALLBACK_SKILLS
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect();

    if found.is_empty() {
        vec![NO_SKILLS_PLACEHOLDER.to_string()]
    } else {
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::{FakeReasoning, Reply};

    #[tokio::test]
    async fn test_empty_text_short_circuits() {
        let llm = FakeReasoning::replying(r#"{"technical_skills":["Rust"],"soft_skills":[]}"#);
        let result = extract_skills("", &llm).await;
        assert!(result.skills.is_empty());
        assert_eq!(llm.calls(), 0);

        let result = extract_skills("  \n ", &llm).await;
        assert!(result.skills.is_empty());
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_llm_reply_concatenates_technical_then_soft() {
        let llm = FakeReasoning::replying(
            r#"{"technical_skills":["Rust","Kafka"],"soft_skills":["Mentoring"]}"#,
        );
        let result = extract_skills("Built Kafka pipelines in Rust", &llm).await;
        assert_eq!(result.skills, vec!["Rust", "Kafka", "Mentoring"]);
        assert_eq!(result.backend, ResultSource::Llm);
    }

    #[tokio::test]
    async fn test_malformed_reply_uses_keyword_scan() {
        let llm = FakeReasoning::replying(r#"{"skills": "python"}"#);
        let result = extract_skills("Senior Python developer with SQL", &llm).await;
        assert_eq!(result.skills, vec!["Python", "SQL"]);
        assert_eq!(result.backend, ResultSource::Fallback);
    }

    #[tokio::test]
    async fn test_service_outage_uses_keyword_scan() {
        let llm = FakeReasoning::failing(Reply::ServerError);
        let result = extract_skills("Team leadership and communication", &llm).await;
        assert_eq!(result.skills, vec!["Communication", "Leadership"]);
    }

    #[tokio::test]
    async fn test_unconfigured_service_never_called() {
        let llm = FakeReasoning::unconfigured();
        let result = extract_skills("Rust and Go", &llm).await;
        assert_eq!(result.skills, vec![NO_SKILLS_PLACEHOLDER]);
        assert_eq!(llm.calls(), 0);
    }

    #[test]
    fn test_keyword_scan_never_empty() {
        assert_eq!(keyword_skills("Carpentry, welding"), vec!["General Skills"]);
    }

    #[test]
    fn test_keyword_scan_substring_semantics() {
        // "JavaScript" contains "Java"; both are reported, in list order.
        assert_eq!(
            keyword_skills("Expert in javascript"),
            vec!["JavaScript", "Java"]
        );
    }
}
