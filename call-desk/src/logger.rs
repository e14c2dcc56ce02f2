//! Logging setup
//!
//! Inside the terminal UI, events go to the `tui-logger` panel (stdout
//! belongs to the UI) and, when a log directory is configured, to a daily
//! rolling file. Headless commands log to stderr.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of the rolling log files
pub const LOG_FILE_PREFIX: &str = "call-desk";

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("cannot create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("logger already initialised: {0}")]
    Init(String),
}

pub fn env_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    Ok(EnvFilter::try_new(level)?)
}

/// Daily rolling appender under `dir`, creating the directory if needed
pub fn file_appender(dir: &Path) -> Result<RollingFileAppender, LoggerError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggerError::LogDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
}

/// Route tracing events to the TUI log panel, plus a rolling file when
/// `log_dir` is set
pub fn init_tui_logger(level: &str, log_dir: Option<&Path>) -> Result<(), LoggerError> {
    let filter = env_filter(level)?;

    let file_layer = match log_dir {
        Some(dir) => Some(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender(dir)?)
                .with_ansi(false)
                .with_target(false),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(file_layer)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    // Widget-side level; the EnvFilter above already decides what is recorded
    tui_logger::init_logger(log::LevelFilter::Trace).ok();
    tui_logger::set_default_level(log::LevelFilter::Trace);

    if let Some(dir) = log_dir {
        tracing::info!("Writing logs to {}", dir.display());
    }
    Ok(())
}

/// Plain stderr logging for headless commands
pub fn init_stderr_logger(level: &str) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_filter_accepts_directives() {
        assert!(env_filter("info").is_ok());
        assert!(env_filter("call_client=debug,warn").is_ok());
        assert!(matches!(
            env_filter("call_desk=loud"),
            Err(LoggerError::Filter(_))
        ));
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs").join("desk");

        let mut appender = file_appender(&dir).unwrap();
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(LOG_FILE_PREFIX));
    }

    #[test]
    fn test_file_appender_rejects_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            file_appender(file.path()),
            Err(LoggerError::LogDir { .. })
        ));
    }
}
