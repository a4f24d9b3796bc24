//! Advice Generator: answers a seeker's career question.

use serde::Serialize;
use tracing::{debug, warn};

use crate::advice::prompts::{build_advice_prompt, ADVICE_SYSTEM};
use crate::advice::templates::fallback_advice;
use crate::llm_client::{LlmError, ReasoningService, ResultSource};
use crate::models::seeker::SeekerProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceOutcome {
    pub advice: String,
    pub backend: ResultSource,
}

/// Never fails: any reasoning-service problem yields the canned template.
pub async fn generate_advice(
    seeker: &SeekerProfile,
    category: &str,
    question: &str,
    llm: &dyn ReasoningService,
) -> AdviceOutcome {
    match advise_with_llm(seeker, category, question, llm).await {
        Ok(advice) => AdviceOutcome {
            advice,
            backend: ResultSource::Llm,
        },
        Err(LlmError::NotConfigured) => {
            debug!("Reasoning service not configured; serving canned advice");
            canned(category, question)
        }
        Err(e) => {
            warn!("AI advice generation failed, serving canned advice: {e}");
            canned(category, question)
        }
    }
}

async fn advise_with_llm(
    seeker: &SeekerProfile,
    category: &str,
    question: &str,
    llm: &dyn ReasoningService,
) -> Result<String, LlmError> {
    if !llm.is_configured() {
        return Err(LlmError::NotConfigured);
    }

    let prompt = build_advice_prompt(seeker, category, question);
    let text = llm.complete(&prompt, ADVICE_SYSTEM).await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text)
}

fn canned(category: &str, question: &str) -> AdviceOutcome {
    AdviceOutcome {
        advice: fallback_advice(category, question),
        backend: ResultSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::templates::SERVICE_NOTICE;
    use crate::llm_client::fake::{FakeReasoning, Reply};

    fn seeker() -> SeekerProfile {
        SeekerProfile {
            skills: "Python, SQL".to_string(),
            experience_years: 3,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_llm_text_returned_verbatim() {
        let llm = FakeReasoning::replying("  Practice mock interviews weekly.\n");
        let outcome = generate_advice(&seeker(), "interview", "How do I prepare?", &llm).await;
        assert_eq!(outcome.advice, "  Practice mock interviews weekly.\n");
        assert_eq!(outcome.backend, ResultSource::Llm);

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("- Skills: Python, SQL"));
        assert!(prompt.contains("- Experience: 3 years"));
        assert!(prompt.contains("- Education: Not specified"));
        assert!(prompt.contains("Specific Question: How do I prepare?"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_a_failure() {
        let llm = FakeReasoning::replying("   ");
        let outcome = generate_advice(&seeker(), "resume", "Is one page enough?", &llm).await;
        assert_eq!(outcome.backend, ResultSource::Fallback);
        assert!(outcome.advice.ends_with(SERVICE_NOTICE));
    }

    #[tokio::test]
    async fn test_gateway_timeout_serves_template() {
        let llm = FakeReasoning::failing(Reply::GatewayTimeout);
        let outcome = generate_advice(&seeker(), "career", "Should I switch teams?", &llm).await;
        assert_eq!(outcome.backend, ResultSource::Fallback);
        assert!(outcome.advice.starts_with("Here are some general tips for growing your career"));
    }

    #[tokio::test]
    async fn test_unknown_category_fallback_echoes_question() {
        let llm = FakeReasoning::unconfigured();
        let outcome = generate_advice(&seeker(), "hobbies", "Should I list chess?", &llm).await;
        assert!(!outcome.advice.is_empty());
        assert!(outcome.advice.contains("Should I list chess?"));
        assert_eq!(llm.calls(), 0);
    }
}
