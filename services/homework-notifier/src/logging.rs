//! Console and rolling-file log output

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global subscriber.
///
/// Logs go to stdout and, when `file` is set, to a daily-rotated file next to
/// it. Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(
    level: Level,
    file: Option<&Path>,
    max_files: usize,
) -> crate::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file {
        Some(path) => {
            let appender = file_appender(path, max_files)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| {
            crate::HomeworkBotError::Config(format!("Installing log subscriber: {}", e))
        })?;

    Ok(guard)
}

/// Daily-rotated appender writing `<path>.<date>`, keeping at most `max_files`
pub fn file_appender(path: &Path, max_files: usize) -> crate::Result<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = path
        .file_name()
        .ok_or_else(|| {
            crate::HomeworkBotError::Config(format!("Log file path {:?} has no file name", path))
        })?
        .to_string_lossy()
        .into_owned();

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(max_files.max(1))
        .build(directory)
        .map_err(|e| {
            crate::HomeworkBotError::Config(format!("Opening log file {:?}: {}", path, e))
        })
}
