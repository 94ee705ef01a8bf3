//! Shared state handed to every axum handler through `State<AppState>`.

use build_manager::{BuildManager, BuildSettings, PackagerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use util::config::AppConfig;
use util::paths::{ensure_dir, resolve_root};

use crate::services::email::{EmailService, MailSettings};

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    builds: BuildManager,
    email: Arc<EmailService>,
    upload_dir: PathBuf,
}

impl AppState {
    /// Creates the upload and executable folders and wires up the build
    /// manager and the SMTP email service.
    pub fn from_config(config: AppConfig) -> std::io::Result<Self> {
        let email = EmailService::smtp(MailSettings::from(&config));
        Self::with_email(config, email)
    }

    /// Same as [`AppState::from_config`] with a caller-supplied email service.
    pub fn with_email(config: AppConfig, email: EmailService) -> std::io::Result<Self> {
        let upload_dir = ensure_dir(resolve_root(&config.upload_folder))?;
        let executable_dir = ensure_dir(resolve_root(&config.executable_folder))?;

        let builds = BuildManager::new(BuildSettings {
            max_concurrent: config.max_concurrent_builds,
            packager: PackagerConfig {
                program: config.packager_program.clone(),
                timeout: config.packager_timeout(),
                artifact_suffix: config.artifact_suffix.clone(),
            },
            dist_dir: executable_dir,
        });

        Ok(Self {
            config: Arc::new(config),
            builds,
            email: Arc::new(email),
            upload_dir,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn builds(&self) -> &BuildManager {
        &self.builds
    }

    pub fn email(&self) -> &EmailService {
        &self.email
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn executable_dir(&self) -> &Path {
        self.builds.dist_dir()
    }
}
