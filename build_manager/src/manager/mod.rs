pub mod locks;
pub mod manager;
pub mod queue;

pub use manager::{BuildManager, BuildOutcome, BuildRequest, BuildSettings};
pub use queue::QueueStats;
