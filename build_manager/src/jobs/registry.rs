use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::job::{Job, JobId, JobStatus};
use crate::error::BuildError;

/// In-memory store of build jobs, shared between the HTTP layer and the
/// spawned build tasks.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    pub async fn get(&self, id: JobId) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    /// All jobs, newest first.
    pub async fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    pub async fn mark_running(&self, id: JobId) {
        self.update(id, |job| {
            job.status = JobStatus::Running;
            job.started_at = Some(Utc::now());
        })
        .await;
    }

    pub async fn mark_succeeded(&self, id: JobId, artifact_name: &str) {
        self.update(id, |job| {
            job.status = JobStatus::Succeeded;
            job.artifact_name = artifact_name.to_string();
            job.error = None;
            job.finished_at = Some(Utc::now());
        })
        .await;
    }

    pub async fn mark_failed(&self, id: JobId, error: &BuildError) {
        let status = if error.is_timeout() {
            JobStatus::TimedOut
        } else {
            JobStatus::Failed
        };
        let message = error.to_string();
        self.update(id, |job| {
            job.status = status;
            job.error = Some(message);
            job.finished_at = Some(Utc::now());
        })
        .await;
    }

    /// Drops finished jobs whose `finished_at` is older than `older_than`.
    /// Returns how many were removed.
    pub async fn prune_finished(&self, older_than: Duration) -> usize {
        let cutoff = match chrono::Duration::from_std(older_than) {
            Ok(d) => Utc::now() - d,
            Err(_) => return 0,
        };

        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| match job.finished_at {
            Some(finished) => !job.status.is_finished() || finished > cutoff,
            None => true,
        });
        before - jobs.len()
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn update<F: FnOnce(&mut Job)>(&self, id: JobId, f: F) {
        match self.jobs.write().await.get_mut(&id) {
            Some(job) => f(job),
            None => tracing::warn!(job_id = %id, "Update for unknown build job"),
        }
    }
}
