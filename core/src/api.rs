//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `specview_core::api` instead of reaching into internal modules.

pub use crate::annotate::{
    clean_body, escape_html, extract_header, file_links, parse_command, summarize, FileLink,
    PatternRole, PatternSet, Summary, FALLBACK_HEADER,
};
pub use crate::command::{build_command, PHPDBG_FLAGS, VENDOR_BINARY};
pub use crate::config::{
    load_default, load_from, AppConfig, ConfigStore, LoggingConfig, OutputFormat,
    CONFIG_FILE_NAME,
};
pub use crate::error::{CliError, ConfigError, RunnerError, SessionError};
pub use crate::runner::exit::normalize_exit;
pub use crate::runner::{
    run_to_completion, ProcessEvent, ProcessExecutor, ProcessHandle, RunRequest, RunResult,
    RunState, RunStep,
};
pub use crate::session::{
    ActiveFile, Notification, NotificationLevel, Notifier, Presenter, Session, SessionServices,
    Workspace, NO_TARGET_MESSAGE,
};
