use crate::annotate::Summary;
use crate::error::RunnerError;

use super::state::{RunState, RunStep};
use super::traits::ProcessHandle;
use super::types::RunResult;

/// Drains `handle`, handing every live snapshot to `on_partial`, and
/// returns once the exit status arrives.
pub async fn run_to_completion<F>(
    mut handle: ProcessHandle,
    mut on_partial: F,
) -> Result<RunResult, RunnerError>
where
    F: FnMut(&Summary),
{
    let mut state = RunState::new();
    let mut chunks = 0usize;

    while let Some(event) = handle.events.recv().await {
        tracing::trace!(target: "specview.runner", stream = event.stream_name(), "process event");
        match state.apply(event) {
            RunStep::Partial(summary) => {
                chunks += 1;
                on_partial(&summary);
            }
            RunStep::Finished(result) => {
                tracing::debug!(
                    target: "specview.runner",
                    pid = ?handle.pid,
                    exit_code = result.exit_code,
                    chunks,
                    stdout_bytes = result.stdout.len(),
                    stderr_bytes = result.stderr.len(),
                    "process finished"
                );
                return Ok(result);
            }
        }
    }

    tracing::error!(
        target: "specview.runner",
        pid = ?handle.pid,
        stdout_bytes = state.stdout().len(),
        stderr_bytes = state.stderr().len(),
        "event stream closed without exit status"
    );
    Err(RunnerError::UnexpectedEof)
}
