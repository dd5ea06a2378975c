use std::path::PathBuf;

use specview_core::api::{
    load_default, load_from, AppConfig, CliError, ConfigStore, Session, SessionError,
};
use specview_plugins::factory;
use specview_plugins::workspace::FsWorkspace;

use crate::commands::cli::{Args, RunArgs};

/// Discovered (or explicit) config with the command-line overrides applied.
pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => load_from(path)?,
        None => load_default()?,
    };

    if let Some(format) = &args.output {
        cfg.set_key("outputFormat", format)?;
    }
    for pair in &args.set {
        let (key, value) = parse_set(pair)?;
        cfg.set_key(key, value)?;
    }
    Ok(cfg)
}

fn parse_set(pair: &str) -> Result<(&str, &str), CliError> {
    pair.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| CliError::Command(format!("--set expects KEY=VALUE, got {pair:?}")))
}

pub fn build_session(cfg: AppConfig, projects: Vec<PathBuf>, file: Option<PathBuf>) -> Session {
    let roots = if projects.is_empty() {
        std::env::current_dir().into_iter().collect()
    } else {
        projects
    };
    let workspace = FsWorkspace::new(roots).with_active(file);
    let services = factory::build_services(&cfg, workspace);
    Session::activate(ConfigStore::new(cfg), services)
}

/// `specview run`: one run, then the process exit code.
pub async fn run_once(
    cfg: AppConfig,
    projects: Vec<PathBuf>,
    args: RunArgs,
) -> Result<i32, CliError> {
    let has_target = args.file.is_some();
    let mut session = build_session(cfg, projects, args.file);

    let outcome = if has_target {
        session.run_class().await
    } else {
        session.run_suite().await
    };
    session.deactivate();

    match outcome {
        Ok(result) => Ok(result.exit_code),
        // already reported through the notifier
        Err(SessionError::NoTargetFile) => Ok(1),
        Err(e) => Err(e.into()),
    }
}
