//! Match Scoring: pluggable, trait-based scorer for a (seeker, job) pair.
//!
//! `LlmMatchScorer` asks the reasoning service and degrades to the basic
//! heuristic on any failure. `BasicMatchScorer` runs only the heuristic.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{complete_json, LlmError, ReasoningService, ResultSource};
use crate::matching::prompts::{build_match_prompt, match_system};
use crate::models::job::JobPosting;
use crate::models::seeker::SeekerProfile;

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Score and rationale for one (seeker, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: u8, // 0 – 100
    pub reasoning: String,
    pub backend: ResultSource,
}

impl MatchOutcome {
    pub fn used_fallback(&self) -> bool {
        self.backend == ResultSource::Fallback
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scoring never fails from the caller's point of view: every backend
/// answers with some score in [0, 100].
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn score(&self, seeker: &SeekerProfile, job: &JobPosting) -> MatchOutcome;
}

/// Picks the scorer for a reasoning service: the LLM-backed one when it is
/// configured, the heuristic alone otherwise.
pub fn scorer_for(llm: Arc<dyn ReasoningService>) -> Arc<dyn MatchScorer> {
    if llm.is_configured() {
        Arc::new(LlmMatchScorer::new(llm))
    } else {
        Arc::new(BasicMatchScorer)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BasicMatchScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct BasicMatchScorer;

#[async_trait]
impl MatchScorer for BasicMatchScorer {
    fn name(&self) -> &'static str {
        "basic"
    }

    async fn score(&self, seeker: &SeekerProfile, job: &JobPosting) -> MatchOutcome {
        basic_match_score(seeker, job)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmMatchScorer {
    llm: Arc<dyn ReasoningService>,
}

impl LlmMatchScorer {
    pub fn new(llm: Arc<dyn ReasoningService>) -> Self {
        Self { llm }
    }

    async fn score_with_llm(
        &self,
        seeker: &SeekerProfile,
        job: &JobPosting,
    ) -> Result<MatchOutcome, LlmError> {
        let prompt = build_match_prompt(seeker, job);
        let reply: LlmMatchReply = complete_json(self.llm.as_ref(), &prompt, &match_system()).await?;

        if !reply.match_score.is_finite() {
            return Err(LlmError::InvalidField("match_score"));
        }

        Ok(MatchOutcome {
            score: reply.match_score.round().clamp(0.0, 100.0) as u8,
            reasoning: reply.reasoning,
            backend: ResultSource::Llm,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LlmMatchReply {
    match_score: f64,
    #[serde(default)]
    reasoning: String,
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn score(&self, seeker: &SeekerProfile, job: &JobPosting) -> MatchOutcome {
        match self.score_with_llm(seeker, job).await {
            Ok(outcome) => outcome,
            Err(LlmError::NotConfigured) => {
                debug!("Reasoning service not configured; using basic match score");
                basic_match_score(seeker, job)
            }
            Err(e) => {
                warn!("AI match scoring failed, using basic match score: {e}");
                basic_match_score(seeker, job)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Basic heuristic
// ────────────────────────────────────────────────────────────────────────────

const BASE_SCORE: i32 = 50;
const PER_SKILL_BONUS: i32 = 10;
const MAX_SKILL_BONUS: i32 = 30;
const EXPERIENCE_BONUS: i32 = 15;
const FALLBACK_MIN: i32 = 20;
const FALLBACK_MAX: i32 = 95;

const NO_CRITERIA_PHRASE: &str = "Limited matching criteria found";
const EXPERIENCE_CLAUSE: &str = "Experience level appears to align with the role";
const FALLBACK_DISCLAIMER: &str = "This is a fallback score calculated without AI analysis.";

/// Deterministic keyword/experience score, clamped to [20, 95].
///
/// Algorithm:
/// 1. Start at 50.
/// 2. Each seeker skill token (split on commas/whitespace, longer than 2 chars)
///    found case-insensitively in the requirements counts once; add
///    min(count × 10, 30).
/// 3. Add 15 once if the requirements mention "junior" and years < 3,
///    "senior" and years ≥ 5, or "mid" and years ≥ 2.
/// 4. Clamp to [20, 95].
pub fn basic_match_score(seeker: &SeekerProfile, job: &JobPosting) -> MatchOutcome {
    let requirements = job.requirements.to_lowercase();
    let mut score = BASE_SCORE;
    let mut clauses = Vec::new();

    let matched: Vec<&str> = skill_tokens(&seeker.skills)
        .filter(|token| requirements.contains(&token.to_lowercase()))
        .collect();

    let skill_bonus = (matched.len() as i32)
        .saturating_mul(PER_SKILL_BONUS)
        .min(MAX_SKILL_BONUS);
    score += skill_bonus;
    if !matched.is_empty() {
        clauses.push(format!("Matching skills: {}", matched.join(", ")));
    }

    if experience_aligns(&requirements, seeker.experience_years) {
        score += EXPERIENCE_BONUS;
        clauses.push(EXPERIENCE_CLAUSE.to_string());
    }

    let score = score.clamp(FALLBACK_MIN, FALLBACK_MAX) as u8;

    let summary = if clauses.is_empty() {
        NO_CRITERIA_PHRASE.to_string()
    } else {
        clauses.join(". ")
    };

    MatchOutcome {
        score,
        reasoning: format!("{summary}. {FALLBACK_DISCLAIMER}"),
        backend: ResultSource::Fallback,
    }
}

/// Splits a free-text skill list on commas and whitespace, keeping tokens
/// longer than two characters. Order and duplicates are preserved.
pub fn skill_tokens(skills: &str) -> impl Iterator<Item = &str> {
    skills
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| token.chars().count() > 2)
}

/// `requirements` must already be lowercased.
fn experience_aligns(requirements: &str, years: u32) -> bool {
    (requirements.contains("junior") && years < 3)
        || (requirements.contains("senior") && years >= 5)
        || (requirements.contains("mid") && years >= 2)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
