pub mod job;
pub mod registry;

pub use job::{Job, JobId, JobStatus};
pub use registry::JobRegistry;
