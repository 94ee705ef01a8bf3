use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant, SystemTime};
use tempfile::tempdir;
use tokio::process::Command;
use tokio::time::timeout;
use util::filename::artifact_name;

use crate::error::BuildError;

/// Bytes of packager stderr kept in error messages.
const STDERR_TAIL_BYTES: usize = 4096;

/// Coarsest mtime resolution we tolerate when checking an artifact is fresh.
const MTIME_SLACK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PackagerConfig {
    /// Executable to invoke, e.g. `pyinstaller`.
    pub program: String,
    pub timeout: Duration,
    /// Appended to the source stem to name the artifact (`.exe` by default).
    pub artifact_suffix: String,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            program: "pyinstaller".into(),
            timeout: Duration::from_secs(300),
            artifact_suffix: ".exe".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackagerOutput {
    pub artifact_name: String,
    pub artifact_path: PathBuf,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Runs `<program> --onefile --distpath <dist_dir> ... <source>` and returns the
/// produced artifact.
///
/// Intermediate build files and the generated spec file go to a temporary
/// directory that is removed when this function returns. The child is killed if
/// the timeout expires.
pub async fn run_packager(
    config: &PackagerConfig,
    source: &Path,
    dist_dir: &Path,
) -> Result<PackagerOutput, BuildError> {
    let work_dir = tempdir()?;
    let started = Instant::now();
    let started_at = SystemTime::now();

    tracing::debug!(
        program = %config.program,
        source = %source.display(),
        dist = %dist_dir.display(),
        "Spawning packager"
    );

    let child = Command::new(&config.program)
        .arg("--onefile")
        .arg("--distpath")
        .arg(dist_dir)
        .arg("--workpath")
        .arg(work_dir.path().join("build"))
        .arg("--specpath")
        .arg(work_dir.path())
        .arg(source)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| BuildError::Spawn {
            program: config.program.clone(),
            source,
        })?;

    // Dropping the wait future on timeout drops the child, and kill_on_drop reaps it.
    let output = match timeout(config.timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(
                source = %source.display(),
                timeout_secs = config.timeout.as_secs(),
                "Packager timed out, killing it"
            );
            return Err(BuildError::Timeout {
                secs: config.timeout.as_secs(),
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(BuildError::PackagerFailed {
            code: output.status.code().unwrap_or(-1),
            stderr: tail(&stderr, STDERR_TAIL_BYTES).to_string(),
        });
    }

    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (artifact_name, artifact_path) =
        locate_artifact(dist_dir, &file_name, &config.artifact_suffix, started_at)?;

    Ok(PackagerOutput {
        artifact_name,
        artifact_path,
        stdout,
        stderr,
        elapsed: started.elapsed(),
    })
}

/// The packager only appends `.exe` on Windows, so fall back to the bare stem.
///
/// Only files modified since `since` count. A leftover from an earlier build
/// is never reported as this run's output.
fn locate_artifact(
    dist_dir: &Path,
    source_name: &str,
    suffix: &str,
    since: SystemTime,
) -> Result<(String, PathBuf), BuildError> {
    let preferred = artifact_name(source_name, suffix);
    let preferred_path = dist_dir.join(&preferred);
    if written_since(&preferred_path, since) {
        return Ok((preferred, preferred_path));
    }

    let bare = artifact_name(source_name, "");
    let bare_path = dist_dir.join(&bare);
    if written_since(&bare_path, since) {
        return Ok((bare, bare_path));
    }

    Err(BuildError::ArtifactMissing(preferred_path))
}

fn written_since(path: &Path, since: SystemTime) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    match metadata.modified() {
        Ok(modified) => modified + MTIME_SLACK >= since,
        // no mtime support: existence is all we can check
        Err(_) => true,
    }
}

fn tail(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut start = s.len() - max_bytes;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
