use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env::is_truthy;
use crate::errors::{Result, RunnerError};

pub const DATADIR_VAR: &str = "RUNNER_DATADIR";
pub const GRADLE_DAEMON_VAR: &str = "RUNNER_GRADLE_DAEMON";
pub const GRADLE_ARGS_VAR: &str = "RUNNER_GRADLE_ARGS";

/// Runner parameters. Values come from an optional YAML file with the
/// `RUNNER_*` environment variables layered on top.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Directory the execution content was checked out under.
    pub datadir: Option<PathBuf>,
    /// Keep the Gradle daemon; when false the runner passes --no-daemon.
    #[serde(default)]
    pub gradle_daemon: bool,
    /// Extra flags passed to every Gradle invocation.
    #[serde(default)]
    pub gradle_args: Vec<String>,
}

impl RunnerConfig {
    /// Load from `path` (when given and present) and overlay the
    /// environment. A missing file is fine; an unreadable or invalid
    /// one is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => RunnerConfig::default(),
        };
        config.merge_env();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| RunnerError::Config(format!("{}: {}", path.display(), e)))
    }

    fn merge_env(&mut self) {
        if let Some(datadir) = non_empty_var(DATADIR_VAR) {
            self.datadir = Some(PathBuf::from(datadir));
        }
        if let Ok(raw) = std::env::var(GRADLE_DAEMON_VAR) {
            self.gradle_daemon = is_truthy(&raw);
        }
        if let Some(raw) = non_empty_var(GRADLE_ARGS_VAR) {
            self.gradle_args = raw.split_whitespace().map(str::to_string).collect();
        }
    }

    /// The data directory, required before any execution can run.
    pub fn datadir(&self) -> Result<&Path> {
        self.datadir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| RunnerError::Config(format!("{} is not set", DATADIR_VAR)))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
