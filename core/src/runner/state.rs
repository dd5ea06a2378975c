use crate::annotate::{summarize, Summary};

use super::events::ProcessEvent;
use super::types::RunResult;

/// Accumulation buffers of the in-flight run.
#[derive(Debug, Default)]
pub struct RunState {
    stdout: String,
    stderr: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunStep {
    /// Live snapshot of the buffer that just grew.
    Partial(Summary),
    Finished(RunResult),
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Folds one event into the buffers. Partial summaries carry no command
    /// label and are flagged as errors until the exit status is known.
    pub fn apply(&mut self, event: ProcessEvent) -> RunStep {
        match event {
            ProcessEvent::Stdout(chunk) => {
                self.stdout.push_str(&chunk);
                RunStep::Partial(summarize(&self.stdout, None, true))
            }
            ProcessEvent::Stderr(chunk) => {
                self.stderr.push_str(&chunk);
                RunStep::Partial(summarize(&self.stderr, None, true))
            }
            ProcessEvent::Exit(code) => RunStep::Finished(self.finish(code)),
        }
    }

    fn finish(&mut self, exit_code: i32) -> RunResult {
        RunResult::new(
            std::mem::take(&mut self.stdout),
            std::mem::take(&mut self.stderr),
            exit_code,
        )
    }
}
