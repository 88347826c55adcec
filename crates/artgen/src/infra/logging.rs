//! Tracing subscriber setup.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use dirs_next::data_local_dir;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ARTGEN_LOG";
const LOG_FILE: &str = "artgen.log";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Headless commands log next to their normal output.
    Stderr,
    /// The TUI owns the terminal, so records go to a file instead.
    File(PathBuf),
}

impl LogTarget {
    /// Log file under the platform data directory, falling back to `.artgen/`.
    pub fn default_file() -> Self {
        let dir = data_local_dir()
            .map(|base| base.join("artgen"))
            .unwrap_or_else(|| PathBuf::from(".artgen"));
        LogTarget::File(dir.join(LOG_FILE))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling this twice keeps the first subscriber.
pub fn init(target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    match target {
        LogTarget::Stderr => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}
