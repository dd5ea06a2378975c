use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

use specview_core::api as core_api;

use super::utf8::Utf8Chunker;

const READ_BUF: usize = 8 * 1024;

/// Runs the command line through the platform shell, so quoting, `~` and
/// env references behave as they would in a terminal.
pub struct ShellRunner {
    channel_capacity: usize,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self {
            channel_capacity: 256,
        }
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn shell_command(command: &str) -> Command {
    let (shell, flag) = if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    };
    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command);
    cmd
}

#[async_trait]
impl core_api::ProcessExecutor for ShellRunner {
    fn name(&self) -> &str {
        "shell"
    }

    async fn execute(
        &self,
        request: &core_api::RunRequest,
    ) -> Result<core_api::ProcessHandle, core_api::RunnerError> {
        let mut cmd = shell_command(&request.command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &request.working_directory {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| core_api::RunnerError::Spawn {
            command: request.command.clone(),
            source,
        })?;
        let pid = child.id();
        tracing::debug!(target: "specview.runner", ?pid, command = %request.command, "spawned");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (tx, rx) = mpsc::channel(self.channel_capacity);

        tokio::spawn(async move {
            let out_task = stdout.map(|s| {
                tokio::spawn(pump(s, "stdout", tx.clone(), core_api::ProcessEvent::Stdout))
            });
            let err_task = stderr.map(|s| {
                tokio::spawn(pump(s, "stderr", tx.clone(), core_api::ProcessEvent::Stderr))
            });
            if let Some(t) = out_task {
                t.await.ok();
            }
            if let Some(t) = err_task {
                t.await.ok();
            }

            let code = match child.wait().await {
                Ok(status) => core_api::normalize_exit(status),
                Err(e) => {
                    tracing::error!(target: "specview.runner", ?pid, error = %e, "wait failed");
                    1
                }
            };
            if tx.send(core_api::ProcessEvent::Exit(code)).await.is_err() {
                tracing::debug!(target: "specview.runner", ?pid, "exit dropped, receiver closed");
            }
        });

        Ok(core_api::ProcessHandle { pid, events: rx })
    }
}

/// Forwards one pipe as chunk events until EOF.
async fn pump<R, F>(
    mut reader: R,
    stream: &'static str,
    tx: mpsc::Sender<core_api::ProcessEvent>,
    wrap: F,
) where
    R: AsyncRead + Unpin,
    F: Fn(String) -> core_api::ProcessEvent,
{
    let mut buf = vec![0u8; READ_BUF];
    let mut decoder = Utf8Chunker::default();

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(source) => {
                let err = core_api::RunnerError::StreamIo { stream, source };
                tracing::warn!(target: "specview.runner", error = %err, "pipe read failed");
                break;
            }
        };
        let text = decoder.push(&buf[..n]);
        if !text.is_empty() && tx.send(wrap(text)).await.is_err() {
            return;
        }
    }

    let rest = decoder.finish();
    if !rest.is_empty() {
        let _ = tx.send(wrap(rest)).await;
    }
}
