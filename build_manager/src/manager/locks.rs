//manager/locks.rs
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per artifact name, so two builds never write the same
/// executable at once.
#[derive(Clone, Default)]
pub struct ArtifactLocks {
    inner: Arc<std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

/// Held for the duration of a build. Dropping it releases the artifact and
/// removes the map entry when no other job is queued on it.
pub struct ArtifactGuard {
    name: String,
    guard: Option<OwnedMutexGuard<()>>,
    locks: ArtifactLocks,
}

impl ArtifactLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, artifact: &str) -> ArtifactGuard {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
            map.entry(artifact.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        let guard = mutex.lock_owned().await;

        ArtifactGuard {
            name: artifact.to_string(),
            guard: Some(guard),
            locks: self.clone(),
        }
    }

    /// Number of artifacts currently tracked (held or waited on).
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        self.guard.take();

        let mut map = self.locks.inner.lock().unwrap_or_else(|p| p.into_inner());
        // strong_count == 1: only the map still refers to it, nobody waits
        let idle = map
            .get(&self.name)
            .is_some_and(|m| Arc::strong_count(m) == 1);
        if idle {
            map.remove(&self.name);
        }
    }
}
