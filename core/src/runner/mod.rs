pub mod exit;
mod events;
mod run;
mod state;
mod traits;
mod types;

pub use events::ProcessEvent;
pub use run::run_to_completion;
pub use state::{RunState, RunStep};
pub use traits::{ProcessExecutor, ProcessHandle};
pub use types::{RunRequest, RunResult};
