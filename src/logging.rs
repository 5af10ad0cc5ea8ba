//! Diagnostic logging setup.
//!
//! Events go to stderr or to `CODE_COMMENTER_LOG_FILE`. Stdout is reserved for
//! the output surface and never receives log lines.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Installs the global `tracing` subscriber.
pub fn init(config: &EnvConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config.effective_log_filter())?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match &config.log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };

    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

pub fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidFilter {
        filter: directive.to_string(),
        source,
    })
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_levels_and_targets() {
        assert!(build_filter("warn").is_ok());
        assert!(build_filter("code_commenter=debug,comment_api=trace").is_ok());
    }

    #[test]
    fn filter_rejects_unknown_level() {
        let error = build_filter("code_commenter=loud").expect_err("unknown level");
        assert!(error.to_string().contains("code_commenter=loud"));
    }

    #[test]
    fn missing_log_directory_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("commenter.log");

        let error = open_log_file(&path).expect_err("parent directory does not exist");
        assert!(matches!(error, LoggingError::OpenFile { path: ref failed, .. } if failed == &path));
    }

    #[test]
    fn init_writes_events_to_log_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("commenter.log");
        let config = EnvConfig {
            log_filter: Some("info".to_string()),
            log_file: Some(path.clone()),
            ..EnvConfig::default()
        };

        init(&config).expect("first subscriber install");
        tracing::info!("log file smoke event");
        assert!(matches!(init(&config), Err(LoggingError::AlreadyInitialized)));

        let contents = std::fs::read_to_string(&path).expect("read log file");
        assert!(contents.contains("log file smoke event"));
    }
}
