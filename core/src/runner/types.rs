use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub command: String,
    /// `None` runs in the current directory.
    pub working_directory: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(command: impl Into<String>, working_directory: Option<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_directory,
        }
    }
}

/// Output of a finished run. Built once, when the exit status arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub succeeded: bool,
}

impl RunResult {
    pub fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            succeeded: exit_code == 0,
        }
    }

    /// The text a failed run should be summarised from: stderr when the
    /// process wrote anything there, stdout otherwise.
    pub fn failure_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}
