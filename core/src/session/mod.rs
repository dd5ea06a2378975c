//! One activated front-end: collaborators, panel state and the three
//! user-facing actions.

mod traits;

pub use traits::{
    ActiveFile, Notification, NotificationLevel, Notifier, Presenter, Workspace,
};

use std::path::{Path, PathBuf};

use tokio::sync::watch;
use uuid::Uuid;

use crate::annotate::{file_links, summarize, FileLink, Summary};
use crate::command::build_command;
use crate::config::{AppConfig, ConfigStore};
use crate::error::{ConfigError, SessionError};
use crate::runner::{run_to_completion, ProcessExecutor, RunRequest, RunResult};

pub const NO_TARGET_MESSAGE: &str =
    "Failed to get filename! Make sure you are in the test file you want run.";

/// Collaborators handed to [`Session::activate`].
pub struct SessionServices {
    pub executor: Box<dyn ProcessExecutor>,
    pub presenter: Box<dyn Presenter>,
    pub notifier: Box<dyn Notifier>,
    pub workspace: Box<dyn Workspace>,
}

pub struct Session {
    config: ConfigStore,
    font_size: watch::Receiver<String>,
    executor: Box<dyn ProcessExecutor>,
    presenter: Box<dyn Presenter>,
    notifier: Box<dyn Notifier>,
    workspace: Box<dyn Workspace>,
    main_view_visible: bool,
    last_summary: Summary,
}

impl Session {
    pub fn activate(config: ConfigStore, services: SessionServices) -> Self {
        let font_size = config.observe_font_size();
        let mut presenter = services.presenter;
        presenter.set_font_size(&font_size.borrow());
        presenter.update(&Summary::placeholder());
        presenter.hide();

        tracing::info!(
            target: "specview.session",
            executor = services.executor.name(),
            presenter = presenter.name(),
            "session activated"
        );

        Self {
            config,
            font_size,
            executor: services.executor,
            presenter,
            notifier: services.notifier,
            workspace: services.workspace,
            main_view_visible: false,
            last_summary: Summary::placeholder(),
        }
    }

    pub fn deactivate(mut self) {
        self.presenter.destroy();
        tracing::info!(target: "specview.session", "session deactivated");
    }

    pub fn config(&self) -> AppConfig {
        self.config.get()
    }

    pub fn set_config(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.config.set_key(key, value)?;
        self.sync_font_size();
        Ok(())
    }

    /// Flips the main view. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.main_view_visible = !self.main_view_visible;
        tracing::info!(target: "specview.session", visible = self.main_view_visible, "main view toggled");
        self.main_view_visible
    }

    pub fn is_main_view_visible(&self) -> bool {
        self.main_view_visible
    }

    pub fn toggle_output(&mut self) {
        self.presenter.toggle();
    }

    pub fn is_output_visible(&self) -> bool {
        self.presenter.is_visible()
    }

    /// File locations linked in the most recent summary.
    pub fn links(&self) -> Vec<FileLink> {
        file_links(&self.last_summary.body_html)
    }

    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        self.workspace
            .open(path)
            .map_err(|source| SessionError::Open {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Runs the spec of the active file.
    pub async fn run_class(&mut self) -> Result<RunResult, SessionError> {
        if self.presenter.is_visible() {
            self.update_view(&Summary::placeholder());
            self.presenter.hide();
        }

        let Some((file, path)) = self.target_file() else {
            tracing::warn!(target: "specview.session", "no target file, run skipped");
            self.notifier.notify(&Notification::error(NO_TARGET_MESSAGE));
            return Err(SessionError::NoTargetFile);
        };

        let cfg = self.config.get();
        if cfg.save_before_test && file.modified {
            self.workspace
                .save(&file)
                .map_err(|source| SessionError::Save {
                    path: path.clone(),
                    source,
                })?;
        }

        let command = build_command(&cfg, Some(&path.to_string_lossy()));
        let cwd = self.workspace.project_folder(&path);
        self.run(&cfg, RunRequest::new(command, cwd)).await
    }

    /// Runs every spec of the project.
    pub async fn run_suite(&mut self) -> Result<RunResult, SessionError> {
        let cfg = self.config.get();
        let command = build_command(&cfg, None);
        let cwd = self.workspace.root_folder();
        self.run(&cfg, RunRequest::new(command, cwd)).await
    }

    async fn run(&mut self, cfg: &AppConfig, request: RunRequest) -> Result<RunResult, SessionError> {
        let run_id = Uuid::new_v4().to_string();
        tracing::info!(
            target: "specview.session",
            run_id = %run_id,
            command = %request.command,
            cwd = ?request.working_directory,
            "starting phpspec"
        );

        self.sync_font_size();
        let handle = self.executor.execute(&request).await?;

        let presenter = &mut self.presenter;
        let last = &mut self.last_summary;
        let result = run_to_completion(handle, |summary| {
            presenter.update(summary);
            *last = summary.clone();
        })
        .await?;

        tracing::info!(
            target: "specview.session",
            run_id = %run_id,
            exit_code = result.exit_code,
            succeeded = result.succeeded,
            "phpspec finished"
        );

        self.present_outcome(cfg, &request.command, &result);
        Ok(result)
    }

    fn present_outcome(&mut self, cfg: &AppConfig, command: &str, result: &RunResult) {
        if result.succeeded {
            self.update_view(&summarize(&result.stdout, Some(command), false));
            if cfg.success_as_notifications {
                self.notifier.notify(
                    &Notification::success("Test Passed!")
                        .with_description(command)
                        .with_detail(result.stdout.as_str()),
                );
            } else {
                self.presenter.show();
            }
        } else if !result.stderr.is_empty() {
            self.update_view(&summarize(result.failure_text(), Some(command), true));
            self.presenter.show();
        } else {
            self.update_view(&summarize(&result.stdout, Some(command), true));
            if cfg.failures_as_notifications {
                self.notifier.notify(
                    &Notification::error("Test Failed!")
                        .with_description(command)
                        .with_detail(result.stdout.as_str()),
                );
            } else {
                self.presenter.show();
            }
        }
    }

    fn update_view(&mut self, summary: &Summary) {
        self.sync_font_size();
        self.presenter.update(summary);
        self.last_summary = summary.clone();
    }

    fn sync_font_size(&mut self) {
        if self.font_size.has_changed().unwrap_or(false) {
            let size = self.font_size.borrow_and_update().clone();
            self.presenter.set_font_size(&size);
        }
    }

    fn target_file(&self) -> Option<(ActiveFile, PathBuf)> {
        let file = self.workspace.active_file()?;
        let path = file.path.clone()?;
        if path.as_os_str().is_empty() {
            return None;
        }
        Some((file, path))
    }
}
