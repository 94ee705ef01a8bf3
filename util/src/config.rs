//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables (and an optional
//! `.env` file). Tests build their own `AppConfig` values with [`AppConfig::from_env`]
//! or struct update syntax instead of touching the global.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

/// An environment value that could not be parsed and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedValue {
    pub key: &'static str,
    pub value: String,
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_dir: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub upload_folder: String,
    pub executable_folder: String,
    pub max_content_length: usize,
    pub packager_program: String,
    pub packager_timeout_secs: u64,
    pub max_concurrent_builds: usize,
    pub artifact_suffix: String,
    pub job_retention_secs: u64,
    pub sender_email: String,
    pub password: String,
    pub subject: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Malformed values seen by [`AppConfig::from_env`]. Configuration is
    /// usually loaded before logging is set up, so they are reported later
    /// through [`AppConfig::log_rejected`].
    pub rejected: Vec<RejectedValue>,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".into(),
            project_name: "quickbuild".into(),
            log_level: "api=info,build_manager=info,util=info".into(),
            log_file: "api.log".into(),
            log_dir: "logs".into(),
            log_to_stdout: true,
            host: "0.0.0.0".into(),
            port: 3000,
            upload_folder: "uploads".into(),
            executable_folder: "executables".into(),
            max_content_length: 10 * 1024 * 1024,
            packager_program: "pyinstaller".into(),
            packager_timeout_secs: 300,
            max_concurrent_builds: 2,
            artifact_suffix: ".exe".into(),
            job_retention_secs: 3600,
            sender_email: String::new(),
            password: String::new(),
            subject: "QUICK MAIL".into(),
            smtp_host: "smtp.gmail.com".into(),
            smtp_port: 587,
            rejected: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every variable is optional. Values that fail to parse fall back to the
    /// default and are listed in `rejected`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let d = AppConfig::default();
        let mut rejected = Vec::new();

        Self {
            env: env::var("APP_ENV").unwrap_or(d.env),
            project_name: env::var("PROJECT_NAME").unwrap_or(d.project_name),
            log_level: env::var("LOG_LEVEL").unwrap_or(d.log_level),
            log_file: env::var("LOG_FILE").unwrap_or(d.log_file),
            log_dir: env::var("LOG_DIR").unwrap_or(d.log_dir),
            log_to_stdout: env::var("LOG_TO_STDOUT")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(d.log_to_stdout),
            host: env::var("HOST").unwrap_or(d.host),
            port: parse_or("PORT", d.port, &mut rejected),
            upload_folder: env::var("UPLOAD_FOLDER").unwrap_or(d.upload_folder),
            executable_folder: env::var("EXECUTABLE_FOLDER").unwrap_or(d.executable_folder),
            max_content_length: parse_or("MAX_CONTENT_LENGTH", d.max_content_length, &mut rejected),
            packager_program: env::var("PACKAGER_PROGRAM").unwrap_or(d.packager_program),
            packager_timeout_secs: parse_or("PACKAGER_TIMEOUT_SECS", d.packager_timeout_secs, &mut rejected),
            max_concurrent_builds: parse_or("MAX_CONCURRENT_BUILDS", d.max_concurrent_builds, &mut rejected),
            artifact_suffix: env::var("ARTIFACT_SUFFIX").unwrap_or(d.artifact_suffix),
            job_retention_secs: parse_or("JOB_RETENTION_SECS", d.job_retention_secs, &mut rejected),
            sender_email: env::var("SENDER_EMAIL").unwrap_or(d.sender_email),
            password: env::var("PASSWORD").unwrap_or(d.password),
            subject: env::var("SUBJECT").unwrap_or(d.subject),
            smtp_host: env::var("SMTP_HOST").unwrap_or(d.smtp_host),
            smtp_port: parse_or("SMTP_PORT", d.smtp_port, &mut rejected),
            rejected,
        }
    }

    /// Logs every value [`AppConfig::from_env`] had to replace with a default.
    pub fn log_rejected(&self) {
        for r in &self.rejected {
            tracing::warn!(key = r.key, value = %r.value, "Ignoring malformed config value, using default");
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    pub fn packager_timeout(&self) -> Duration {
        Duration::from_secs(self.packager_timeout_secs)
    }

    pub fn job_retention(&self) -> Duration {
        Duration::from_secs(self.job_retention_secs)
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T: FromStr + Copy>(
    key: &'static str,
    default: T,
    rejected: &mut Vec<RejectedValue>,
) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                rejected.push(RejectedValue { key, value: raw });
                default
            }
        },
        Err(_) => default,
    }
}
