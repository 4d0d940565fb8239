use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console and daily-rotated JSON file logging.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let _ = fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, "schedule.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Console goes to stderr so `shows --json` output stays clean
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lh_schedule=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}
