use api::app::build_app;
use api::state::AppState;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use std::{net::SocketAddr, time::Duration};
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::config::AppConfig;

/// How often finished jobs are checked against the retention window.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

const DEFAULT_LOG_FILTER: &str = "api=info,build_manager=info,util=info";

#[tokio::main]
async fn main() {
    let config = AppConfig::global().clone();

    // Held for the lifetime of the process so buffered log lines are flushed
    let _log_guard = init_logging(&config);
    config.log_rejected();

    let app_state = AppState::from_config(config.clone())
        .expect("Failed to create upload/executable folders");

    tracing::info!(
        uploads = %app_state.upload_dir().display(),
        executables = %app_state.executable_dir().display(),
        packager = %config.packager_program,
        max_concurrent_builds = config.max_concurrent_builds,
        "Storage ready"
    );

    spawn_job_pruner(app_state.clone(), config.job_retention());

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);
    let app = build_app(app_state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!(env = %config.env, "Starting {} on http://{}", config.project_name, addr);

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server crashed");
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    std::fs::create_dir_all(&config.log_dir).ok();

    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let (env_filter, filter_error) = match EnvFilter::try_new(&config.log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    if let Some(e) = filter_error {
        tracing::warn!(
            log_level = %config.log_level,
            error = %e,
            fallback = DEFAULT_LOG_FILTER,
            "Invalid LOG_LEVEL, using default filter"
        );
    }

    guard
}

fn spawn_job_pruner(app_state: AppState, retention: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let removed = app_state.builds().prune(retention).await;
            if removed > 0 {
                tracing::debug!(removed, "Pruned finished build jobs");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
