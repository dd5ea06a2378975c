use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn process: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while streaming: {stream}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("process event stream closed before an exit status was received")]
    UnexpectedEof,
}
