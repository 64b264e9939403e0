use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub const LOG_FILE_PREFIX: &str = "santa.log";

/// Install the global subscriber.
///
/// Stdout carries the program's results, so console logs go to stderr. The
/// returned guards flush buffered output when dropped and must be held until
/// exit. An unusable `log_dir` only disables the file layer.
pub fn init(level: tracing::Level, log_dir: Option<&Path>) -> Vec<WorkerGuard> {
    use tracing_subscriber::fmt::format::FmtSpan;

    let mut guards = Vec::new();

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    guards.push(stderr_guard);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(filter(level));

    let file_layer = match log_dir.map(file_appender) {
        Some(Ok(appender)) => {
            let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
            guards.push(file_guard);

            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file_writer)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(filter(level)),
            )
        }
        Some(Err(e)) => {
            eprintln!("Warning: file logging disabled: {}", e);
            None
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    register_panic_logger();
    report_build_info();

    guards
}

#[derive(Debug, thiserror::Error)]
pub enum LogFileError {
    #[error("cannot create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open log file in {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: InitError,
    },
}

/// Daily-rolling appender in `log_dir`, created if missing
fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, LogFileError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LogFileError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
        .map_err(|source| LogFileError::Open {
            path: log_dir.to_path_buf(),
            source,
        })
}

fn filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn register_panic_logger() {
    std::panic::set_hook(Box::new(|panic| match panic.location() {
        Some(loc) => {
            tracing::error!(
                message = %panic,
                panic.file = loc.file(),
                panic.line = loc.line(),
                panic.column = loc.column(),
            );
        }
        None => tracing::error!(message = %panic),
    }));
}

fn report_build_info() {
    let build = common::build_info!();

    tracing::debug!(
        version = build.version,
        repo_version = build.repo_version,
        build_profile = build.build_profile,
        "santa starting up"
    );
}
