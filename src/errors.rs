use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunnerError>;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid execution request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("invalid runner config: {0}")]
    Config(String),

    #[error("data directory {} does not exist", .0.display())]
    MissingDatadir(PathBuf),

    #[error("unsupported test type: {0}")]
    TestType(String),

    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("could not process reports: {0}")]
    Report(String),
}
