pub mod packager;

pub use packager::{PackagerConfig, PackagerOutput, run_packager};
