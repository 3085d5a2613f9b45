//! Harness errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read skirmish script {path}")]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse skirmish script: {0}")]
    ScriptParse(#[source] serde_json::Error),

    #[error("failed to spawn game loop thread")]
    Spawn(#[source] std::io::Error),

    #[error("game loop thread panicked")]
    LoopPanicked,

    #[error("failed to write report: {0}")]
    Report(#[source] serde_json::Error),
}
