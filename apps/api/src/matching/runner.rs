//! Matching run: scores one job against every seeker and stores the results.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::matching::scorer::{MatchOutcome, MatchScorer};
use crate::models::job::JobRow;
use crate::models::seeker::SeekerRow;

/// The persistence a matching run needs: one read of the job, one read of
/// all seekers, and a single upsert per scored pair.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRow>>;
    async fn seekers(&self) -> Result<Vec<SeekerRow>>;
    async fn upsert_match(&self, seeker_id: Uuid, job_id: Uuid, outcome: &MatchOutcome)
        -> Result<()>;
}

#[async_trait]
impl MatchStore for PgPool {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRow>> {
        Ok(db::jobs::get_job(self, job_id).await?)
    }

    async fn seekers(&self) -> Result<Vec<SeekerRow>> {
        Ok(db::seekers::list_seekers(self).await?)
    }

    async fn upsert_match(
        &self,
        seeker_id: Uuid,
        job_id: Uuid,
        outcome: &MatchOutcome,
    ) -> Result<()> {
        db::matches::upsert_match(self, seeker_id, job_id, outcome).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchRunSummary {
    pub job_id: Uuid,
    pub scored: usize,
    pub skipped: usize,
    pub failed: usize,
    pub fallback_used: usize,
}

/// Scores `job_id` against every seeker, one seeker at a time.
///
/// Seekers with neither résumé text nor skills are skipped. A failure while
/// storing one seeker's result is logged and counted; the run continues.
pub async fn run_matching_for_job(
    store: &dyn MatchStore,
    scorer: &dyn MatchScorer,
    job_id: Uuid,
) -> Result<MatchRunSummary> {
    let job = store
        .job(job_id)
        .await?
        .ok_or_else(|| anyhow!("Job {job_id} not found for matching"))?;
    let posting = job.posting();

    let seekers = store.seekers().await?;
    let mut summary = MatchRunSummary {
        job_id,
        ..Default::default()
    };

    for seeker in &seekers {
        if !seeker.is_matchable() {
            summary.skipped += 1;
            continue;
        }

        let outcome = scorer.score(&seeker.profile(), &posting).await;

        match store.upsert_match(seeker.id, job_id, &outcome).await {
            Ok(()) => {
                summary.scored += 1;
                if outcome.used_fallback() {
                    summary.fallback_used += 1;
                }
            }
            Err(e) => {
                error!("Error matching job {job_id} with seeker {}: {e:#}", seeker.id);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Matching for job {job_id}: scored={} skipped={} failed={} fallback={}",
        summary.scored, summary.skipped, summary.failed, summary.fallback_used
    );

    Ok(summary)
}

/// Starts a matching run in the background; the caller does not wait for it.
pub fn spawn_matching(store: Arc<dyn MatchStore>, scorer: Arc<dyn MatchScorer>, job_id: Uuid) {
    tokio::spawn(async move {
        if let Err(e) = run_matching_for_job(store.as_ref(), scorer.as_ref(), job_id).await {
            error!("Error running matching for job {job_id}: {e:#}");
        }
    });
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use sqlx::types::Json;

    use super::*;
    use crate::matching::scorer::BasicMatchScorer;
    use crate::models::seeker::Priorities;

    pub(crate) fn make_seeker(skills: &str, resume_text: Option<&str>, years: i32) -> SeekerRow {
        SeekerRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: "Test Seeker".to_string(),
            resume_text: resume_text.map(String::from),
            resume_s3_key: None,
            skills: skills.to_string(),
            experience_years: years,
            education: String::new(),
            location: String::new(),
            phone: String::new(),
            linkedin_url: String::new(),
            portfolio_url: String::new(),
            bio: String::new(),
            priorities: Json(Priorities::default()),
            preferred_job_types: vec![],
            remote_work_preference: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn make_job(requirements: &str) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Data Engineer".to_string(),
            description: "Build pipelines".to_string(),
            requirements: requirements.to_string(),
            salary_range: String::new(),
            location: String::new(),
            job_type: "full-time".to_string(),
            remote_option: false,
            experience_level: String::new(),
            education_level: String::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct MemoryStore {
        job: Option<JobRow>,
        seekers: Vec<SeekerRow>,
        poisoned_seeker: Option<Uuid>,
        matches: Mutex<HashMap<(Uuid, Uuid), MatchOutcome>>,
        writes: Mutex<usize>,
    }

    impl MemoryStore {
        fn new(job: JobRow, seekers: Vec<SeekerRow>) -> Self {
            Self {
                job: Some(job),
                seekers,
                poisoned_seeker: None,
                matches: Mutex::new(HashMap::new()),
                writes: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl MatchStore for MemoryStore {
        async fn job(&self, job_id: Uuid) -> Result<Option<JobRow>> {
            Ok(self.job.clone().filter(|j| j.id == job_id))
        }

        async fn seekers(&self) -> Result<Vec<SeekerRow>> {
            Ok(self.seekers.clone())
        }

        async fn upsert_match(
            &self,
            seeker_id: Uuid,
            job_id: Uuid,
            outcome: &MatchOutcome,
        ) -> Result<()> {
            if self.poisoned_seeker == Some(seeker_id) {
                return Err(anyhow!("simulated write failure"));
            }
            *self.writes.lock().unwrap() += 1;
            self.matches
                .lock()
                .unwrap()
                .insert((seeker_id, job_id), outcome.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_scores_matchable_seekers_and_skips_empty_ones() {
        let job = make_job("python sql");
        let job_id = job.id;
        let store = MemoryStore::new(
            job,
            vec![
                make_seeker("Python, SQL", None, 1),
                make_seeker("", Some("Resume mentioning python"), 1),
                make_seeker("  ", None, 3),
            ],
        );

        let summary = run_matching_for_job(&store, &BasicMatchScorer, job_id)
            .await
            .unwrap();

        assert_eq!(summary.scored, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.fallback_used, 2);
        let first = store.seekers[0].id;
        assert_eq!(store.matches.lock().unwrap()[&(first, job_id)].score, 70);
    }

    #[tokio::test]
    async fn test_one_failing_seeker_does_not_abort_run() {
        let job = make_job("rust");
        let job_id = job.id;
        let seekers = vec![
            make_seeker("rust", None, 1),
            make_seeker("rust", None, 2),
            make_seeker("rust", None, 3),
        ];
        let poisoned = seekers[1].id;
        let mut store = MemoryStore::new(job, seekers);
        store.poisoned_seeker = Some(poisoned);

        let summary = run_matching_for_job(&store, &BasicMatchScorer, job_id)
            .await
            .unwrap();

        assert_eq!(summary.scored, 2);
        assert_eq!(summary.failed, 1);
        assert!(!store
            .matches
            .lock()
            .unwrap()
            .contains_key(&(poisoned, job_id)));
    }

    #[tokio::test]
    async fn test_rerun_overwrites_instead_of_appending() {
        let job = make_job("python");
        let job_id = job.id;
        let store = MemoryStore::new(job, vec![make_seeker("python", None, 1)]);

        run_matching_for_job(&store, &BasicMatchScorer, job_id)
            .await
            .unwrap();
        run_matching_for_job(&store, &BasicMatchScorer, job_id)
            .await
            .unwrap();

        assert_eq!(store.matches.lock().unwrap().len(), 1);
        assert_eq!(*store.writes.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_job_is_an_error() {
        let store = MemoryStore::new(make_job("x"), vec![]);
        let result = run_matching_for_job(&store, &BasicMatchScorer, Uuid::new_v4()).await;
        assert!(result.is_err());
    }
}
