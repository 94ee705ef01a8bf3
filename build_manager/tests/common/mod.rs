#![allow(dead_code)]

use build_manager::{BuildManager, BuildRequest, BuildSettings, PackagerConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// A stand-in for the real packager: parses `--distpath`, sleeps, then writes
/// `<dist>/<stem>` (or fails when `fail` is set).
pub fn fake_packager(dir: &Path, sleep_secs: u64, fail: bool) -> PathBuf {
    let failure = if fail {
        "echo \"SyntaxError: invalid syntax in $src\" >&2\nexit 3\n"
    } else {
        ""
    };
    let script = format!(
        r#"#!/bin/sh
dist=""
src=""
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist="$2"; shift 2 ;;
    --workpath|--specpath) shift 2 ;;
    --onefile) shift ;;
    *) src="$1"; shift ;;
  esac
done
name=$(basename "$src")
name="${{name%.*}}"
sleep {sleep_secs}
{failure}echo "building $name"
printf 'fake executable for %s' "$name" > "$dist/$name"
"#
    );

    let path = dir.join("fake-packager.sh");
    fs::write(&path, script).expect("write fake packager");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake packager");
    path
}

pub struct Fixture {
    pub root: TempDir,
    pub manager: BuildManager,
}

impl Fixture {
    pub fn new(max_concurrent: usize, sleep_secs: u64, fail: bool, timeout: Duration) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let program = fake_packager(root.path(), sleep_secs, fail);
        let dist_dir = root.path().join("executables");
        fs::create_dir_all(&dist_dir).unwrap();
        fs::create_dir_all(root.path().join("uploads")).unwrap();

        let manager = BuildManager::new(BuildSettings {
            max_concurrent,
            packager: PackagerConfig {
                program: program.to_string_lossy().into_owned(),
                timeout,
                artifact_suffix: String::new(),
            },
            dist_dir,
        });

        Self { root, manager }
    }

    /// Saves an upload under `uploads/<subdir>/<name>` and returns the request for it.
    /// A non-empty `subdir` is handed to the manager as the upload's own folder.
    pub fn upload(&self, subdir: &str, name: &str) -> BuildRequest {
        let dir = self.root.path().join("uploads").join(subdir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join(name);
        fs::write(&source, b"print('hello')\n").unwrap();
        BuildRequest {
            source,
            source_name: name.to_string(),
            scratch_dir: (!subdir.is_empty()).then_some(dir),
        }
    }
}
