use std::path::PathBuf;

use thiserror::Error;

use super::RunnerError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// No active file, no backing file, or an empty path.
    #[error("no target file to run")]
    NoTargetFile,

    #[error("failed to save {path} before running")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
