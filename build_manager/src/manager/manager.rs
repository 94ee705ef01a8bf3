// manager/manager.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use util::filename::artifact_name;

use crate::error::BuildError;
use crate::jobs::{Job, JobId, JobRegistry};
use crate::manager::locks::ArtifactLocks;
use crate::manager::queue::{Queue, QueueStats};
use crate::packager::{PackagerConfig, PackagerOutput, run_packager};

#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub max_concurrent: usize,
    pub packager: PackagerConfig,
    /// Where artifacts are written (`--distpath`).
    pub dist_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Saved upload on disk.
    pub source: PathBuf,
    /// Sanitized upload name; the artifact name derives from it.
    pub source_name: String,
    /// Folder owned by this upload, removed once the packager is done with it.
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub job: Job,
    pub output: PackagerOutput,
}

/// Runs packager jobs with a global concurrency cap and per-artifact mutual
/// exclusion, and tracks every job in a [`JobRegistry`].
///
/// Clones share the same queue, locks and registry.
#[derive(Clone)]
pub struct BuildManager {
    queue: Arc<Mutex<Queue>>,
    locks: ArtifactLocks,
    jobs: JobRegistry,
    settings: Arc<BuildSettings>,
}

impl BuildManager {
    pub fn new(settings: BuildSettings) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::new(settings.max_concurrent))),
            locks: ArtifactLocks::new(),
            jobs: JobRegistry::new(),
            settings: Arc::new(settings),
        }
    }

    pub fn dist_dir(&self) -> &Path {
        &self.settings.dist_dir
    }

    pub fn artifact_name_for(&self, source_name: &str) -> String {
        artifact_name(source_name, &self.settings.packager.artifact_suffix)
    }

    /// Registers a job and runs it in the background. Poll with [`BuildManager::job`].
    pub async fn submit(&self, request: BuildRequest) -> Job {
        let job = self.register(&request).await;
        let id = job.id;
        let this = self.clone();

        tokio::spawn(async move {
            // outcome is recorded in the registry by execute()
            let _ = this.execute(id, request).await;
        });

        job
    }

    /// Registers a job and waits for it to finish.
    ///
    /// The work runs on its own task, so dropping this future (e.g. a client
    /// disconnecting mid-request) does not leak the slot or the artifact lock.
    pub async fn build(&self, request: BuildRequest) -> Result<BuildOutcome, BuildError> {
        let job = self.register(&request).await;
        let id = job.id;
        let this = self.clone();

        let output = tokio::spawn(async move { this.execute(id, request).await })
            .await
            .map_err(|e| BuildError::Aborted(e.to_string()))??;

        let job = self.jobs.get(id).await.unwrap_or(job);
        Ok(BuildOutcome { job, output })
    }

    pub async fn job(&self, id: JobId) -> Option<Job> {
        self.jobs.get(id).await
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.jobs.list().await
    }

    pub async fn stats(&self) -> QueueStats {
        self.queue.lock().await.stats()
    }

    /// Forgets finished jobs older than `retention`.
    pub async fn prune(&self, retention: Duration) -> usize {
        self.jobs.prune_finished(retention).await
    }

    async fn register(&self, request: &BuildRequest) -> Job {
        let job = Job::queued(
            request.source_name.clone(),
            self.artifact_name_for(&request.source_name),
        );
        tracing::info!(
            job_id = %job.id,
            source = %job.source_name,
            artifact = %job.artifact_name,
            "Build job queued"
        );
        self.jobs.insert(job.clone()).await;
        job
    }

    async fn execute(&self, id: JobId, request: BuildRequest) -> Result<PackagerOutput, BuildError> {
        let artifact = self.artifact_name_for(&request.source_name);

        // Artifact lock first, so a job waiting on a busy artifact holds no slot.
        let _artifact_guard = self.locks.acquire(&artifact).await;

        let maybe_notify = {
            let mut queue = self.queue.lock().await;
            queue.try_acquire_slot()
        };

        // If we got a notify, wait for it outside the mutex
        if let Some(notify) = maybe_notify {
            tracing::debug!(job_id = %id, "Waiting for a build slot");
            notify.notified().await;
        }

        self.jobs.mark_running(id).await;
        tracing::info!(job_id = %id, source = %request.source.display(), "Build started");

        let result = run_packager(
            &self.settings.packager,
            &request.source,
            &self.settings.dist_dir,
        )
        .await;

        // Release slot after run finishes
        {
            let mut queue = self.queue.lock().await;
            queue.release_slot();
        }

        if let Some(dir) = &request.scratch_dir {
            remove_scratch_dir(id, dir).await;
        }

        match &result {
            Ok(output) => {
                self.jobs.mark_succeeded(id, &output.artifact_name).await;
                tracing::info!(
                    job_id = %id,
                    artifact = %output.artifact_name,
                    elapsed_ms = output.elapsed.as_millis() as u64,
                    "Build succeeded"
                );
            }
            Err(e) => {
                self.jobs.mark_failed(id, e).await;
                tracing::error!(job_id = %id, error = %e, "Build failed");
            }
        }

        result
    }
}

async fn remove_scratch_dir(id: JobId, dir: &Path) {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => tracing::debug!(job_id = %id, dir = %dir.display(), "Removed upload folder"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            job_id = %id,
            dir = %dir.display(),
            error = %e,
            "Failed to remove upload folder"
        ),
    }
}
