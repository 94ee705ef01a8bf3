use api::app::build_app;
use api::services::email::{EmailService, MailSettings};
use api::state::AppState;
use axum::Router;
use lettre::transport::stub::AsyncStubTransport;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use util::config::AppConfig;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub mail: AsyncStubTransport,
    // keeps the storage folders alive for the test
    pub root: TempDir,
}

#[derive(Clone, Copy)]
pub enum Packager {
    Working,
    Failing,
}

/// Parses `--distpath`, then writes `<dist>/<stem>` or fails with exit code 2.
fn write_fake_packager(dir: &Path, packager: Packager) -> PathBuf {
    let tail = match packager {
        Packager::Working => "printf 'fake executable for %s' \"$name\" > \"$dist/$name\"\n",
        Packager::Failing => "echo \"ModuleNotFoundError: No module named 'nope'\" >&2\nexit 2\n",
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
{tail}"#
    );
    let path = dir.join("fake-packager.sh");
    fs::write(&path, script).expect("write fake packager");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake packager");
    path
}

pub fn make_test_app_with(packager: Packager, max_content_length: usize) -> TestApp {
    let root = tempfile::tempdir().expect("tempdir");
    let program = write_fake_packager(root.path(), packager);

    let config = AppConfig {
        env: "test".into(),
        upload_folder: root.path().join("uploads").to_string_lossy().into_owned(),
        executable_folder: root.path().join("executables").to_string_lossy().into_owned(),
        packager_program: program.to_string_lossy().into_owned(),
        packager_timeout_secs: 30,
        artifact_suffix: String::new(),
        max_content_length,
        sender_email: "sender@example.com".into(),
        password: "app-password".into(),
        ..AppConfig::default()
    };

    let mail = AsyncStubTransport::new_ok();
    let email = EmailService::stub(MailSettings::from(&config), mail.clone());
    let state = AppState::with_email(config, email).expect("app state");

    TestApp {
        app: build_app(state.clone()),
        state,
        mail,
        root,
    }
}

pub fn make_test_app() -> TestApp {
    make_test_app_with(Packager::Working, 10 * 1024 * 1024)
}
