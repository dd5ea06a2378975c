/// What a running process reports, in arrival order.
///
/// A well-behaved executor emits any number of chunks and then exactly one
/// `Exit`. Chunks of the two streams may interleave arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Stdout(String),
    Stderr(String),
    Exit(i32),
}

impl ProcessEvent {
    pub fn stream_name(&self) -> &'static str {
        match self {
            ProcessEvent::Stdout(_) => "stdout",
            ProcessEvent::Stderr(_) => "stderr",
            ProcessEvent::Exit(_) => "exit",
        }
    }
}
