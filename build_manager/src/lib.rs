//! Build-job queue for turning uploaded source files into standalone executables.
//!
//! Jobs are packaged by an external tool (`pyinstaller` by default) under a
//! global concurrency cap, with at most one build per artifact at a time, and
//! are tracked in memory so callers can poll them.

pub mod error;
pub mod jobs;
pub mod manager;
pub mod packager;

pub use error::BuildError;
pub use jobs::{Job, JobId, JobStatus};
pub use manager::{BuildManager, BuildOutcome, BuildRequest, BuildSettings, QueueStats};
pub use packager::PackagerConfig;
