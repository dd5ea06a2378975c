mod cli_error;
mod config_error;
mod runner_error;
mod session_error;

pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use runner_error::RunnerError;
pub use session_error::SessionError;
