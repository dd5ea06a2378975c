use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::RunnerError;

use super::events::ProcessEvent;
use super::types::RunRequest;

/// Receiving side of a spawned process.
pub struct ProcessHandle {
    pub pid: Option<u32>,
    pub events: mpsc::Receiver<ProcessEvent>,
}

#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    fn name(&self) -> &str;

    /// Starts `request.command` and returns its event stream. Failing to
    /// start is an error; a non-zero exit is not.
    async fn execute(&self, request: &RunRequest) -> Result<ProcessHandle, RunnerError>;
}
