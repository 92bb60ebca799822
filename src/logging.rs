//! Logging setup
//!
//! The import wizard owns the terminal, so its logs go to a file under the user's home
//! directory. Command-line tools log to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Error;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "g1_extension_ui=info";

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default log file, `~/.g1-extension/ui.log`
pub fn default_log_path() -> PathBuf {
    let mut log_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    log_path.push(".g1-extension");
    log_path.push("ui.log");
    log_path
}

fn env_filter() -> Result<EnvFilter, Error> {
    match std::env::var("RUST_LOG") {
        Ok(filter) if !filter.is_empty() => EnvFilter::try_new(&filter),
        _ => EnvFilter::try_new(DEFAULT_LOG_FILTER),
    }
    .map_err(|e| Error::Config(format!("Failed to create environment filter: {}", e)))
}

/// Install the global tracing subscriber
pub fn init_logging(target: &LogTarget) -> Result<(), Error> {
    let env_filter = env_filter()?;

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false), // no colors in files
                )
                .try_init()
        }
    };

    result.map_err(|e| Error::Other(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path() {
        let path = default_log_path();
        assert!(path.ends_with(".g1-extension/ui.log"));
    }

    #[test]
    fn test_file_logging_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("ui.log");

        // another test may already own the global subscriber
        let _ = init_logging(&LogTarget::File(path.clone()));
        assert!(path.parent().unwrap().exists());
    }
}
