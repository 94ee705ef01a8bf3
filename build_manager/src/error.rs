use std::path::PathBuf;

/// Everything that can go wrong between receiving a source file and having an
/// executable on disk.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to start packager '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("packager exited with status {code}: {stderr}")]
    PackagerFailed { code: i32, stderr: String },

    #[error("packager timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("packager finished but produced no artifact at {0}")]
    ArtifactMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("build task aborted: {0}")]
    Aborted(String),
}

impl BuildError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BuildError::Timeout { .. })
    }
}
