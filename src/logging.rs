use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";

/// Set up the global tracing subscriber: human-readable console output plus
/// a daily-rotated JSON log file under `logs/`.
///
/// `RUST_LOG` overrides the default `adprep=info` filter.
pub fn init_logging() {
    let _ = fs::create_dir_all(LOG_DIR);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adprep=info"));

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "adprep.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    // The guard flushes buffered log lines on drop; the subscriber lives for
    // the whole process, so leak it.
    std::mem::forget(guard);
}
