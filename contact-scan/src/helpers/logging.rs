use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILE: &str = "contact-scan.log";

/// Install the global subscriber. Logs go to stdout and, when a path is
/// given, also to that file without ANSI colors.
///
/// The returned guard must be held until exit or buffered file output is lost.
pub fn init_tracing(log_file_path: Option<String>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_path) = log_file_path else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
        return None;
    };

    let (directory, file_name) = log_file_location(Path::new(&log_path));
    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

/// Directory and file name for the appender. A bare file name lands in the
/// working directory.
fn log_file_location(log_path: &Path) -> (&Path, &OsStr) {
    let directory = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new(DEFAULT_LOG_FILE));
    (directory, file_name)
}
