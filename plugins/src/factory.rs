use specview_core::api as core_api;
use specview_core::api::{AppConfig, OutputFormat};

use crate::notifier::TerminalNotifier;
use crate::presenter::{HtmlPanel, JsonlPanel, TerminalPanel};
use crate::runner::ShellRunner;
use crate::workspace::FsWorkspace;

pub fn build_executor(_cfg: &AppConfig) -> Box<dyn core_api::ProcessExecutor> {
    Box::new(ShellRunner::new())
}

pub fn build_presenter(cfg: &AppConfig) -> Box<dyn core_api::Presenter> {
    match cfg.output_format {
        OutputFormat::Text => Box::new(TerminalPanel::stdout()),
        OutputFormat::Html => Box::new(HtmlPanel::new(&cfg.html_path)),
        OutputFormat::Jsonl => Box::new(JsonlPanel::stdout()),
    }
}

pub fn build_notifier(_cfg: &AppConfig) -> Box<dyn core_api::Notifier> {
    Box::new(TerminalNotifier::stderr())
}

pub fn build_services(cfg: &AppConfig, workspace: FsWorkspace) -> core_api::SessionServices {
    core_api::SessionServices {
        executor: build_executor(cfg),
        presenter: build_presenter(cfg),
        notifier: build_notifier(cfg),
        workspace: Box::new(workspace),
    }
}
