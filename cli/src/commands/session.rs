use std::path::PathBuf;

use specview_core::api::{AppConfig, CliError, FileLink, Session, SessionError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app;
use crate::commands::cli::SessionArgs;

const HELP: &str = "\
commands:
  toggle              flip the main view
  run-class [FILE]    run the spec of FILE, or of the active file
  run-suite           run every spec of the project
  toggle-output       show or hide the output panel
  links               list file locations of the last run
  open FILE|N         make FILE (or listed location N) the active file
  set KEY VALUE       change a setting
  help                show this text
  quit                leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Toggle,
    RunClass(Option<PathBuf>),
    RunSuite,
    ToggleOutput,
    Links,
    Open(String),
    Set { key: String, value: String },
    Help,
    Quit,
}

/// Parses one stdin line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let cmd = match verb {
        "toggle" => ReplCommand::Toggle,
        "run-class" if rest.is_empty() => ReplCommand::RunClass(None),
        "run-class" => ReplCommand::RunClass(Some(PathBuf::from(rest))),
        "run-suite" => ReplCommand::RunSuite,
        "toggle-output" => ReplCommand::ToggleOutput,
        "links" => ReplCommand::Links,
        "open" if rest.is_empty() => return Err("usage: open FILE|N".to_string()),
        "open" => ReplCommand::Open(rest.to_string()),
        "set" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) => ReplCommand::Set {
                key: key.to_string(),
                value: value.trim().to_string(),
            },
            None => return Err("usage: set KEY VALUE".to_string()),
        },
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

/// `open N` picks the N-th listed location; anything else is a path.
fn resolve_open(target: &str, links: &[FileLink]) -> PathBuf {
    match target.parse::<usize>() {
        Ok(n) if (1..=links.len()).contains(&n) => PathBuf::from(&links[n - 1].path),
        _ => PathBuf::from(target),
    }
}

/// `specview session`: reads actions from stdin until `quit` or EOF.
pub async fn run_interactive(
    cfg: AppConfig,
    projects: Vec<PathBuf>,
    args: SessionArgs,
) -> Result<i32, CliError> {
    let mut session = app::build_session(cfg, projects, args.file);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let cmd = match parse_line(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        if cmd == ReplCommand::Quit {
            break;
        }
        if let Err(e) = dispatch(&mut session, cmd).await {
            tracing::warn!(target: "specview.cli", error = %e, "command failed");
            eprintln!("{e}");
        }
    }

    session.deactivate();
    Ok(0)
}

async fn dispatch(session: &mut Session, cmd: ReplCommand) -> Result<(), SessionError> {
    match cmd {
        ReplCommand::Toggle => {
            let visible = session.toggle();
            eprintln!("main view {}", if visible { "shown" } else { "hidden" });
        }
        ReplCommand::RunClass(file) => {
            if let Some(file) = file {
                session.open(&file)?;
            }
            match session.run_class().await {
                Ok(result) => eprintln!("exit code {}", result.exit_code),
                // the notifier has already told the user
                Err(SessionError::NoTargetFile) => {}
                Err(e) => return Err(e),
            }
        }
        ReplCommand::RunSuite => {
            let result = session.run_suite().await?;
            eprintln!("exit code {}", result.exit_code);
        }
        ReplCommand::ToggleOutput => session.toggle_output(),
        ReplCommand::Links => {
            let links = session.links();
            if links.is_empty() {
                eprintln!("no file locations");
            }
            for (i, link) in links.iter().enumerate() {
                eprintln!("{:>3}) {link}", i + 1);
            }
        }
        ReplCommand::Open(target) => {
            let path = resolve_open(&target, &session.links());
            session.open(&path)?;
            eprintln!("active file: {}", path.display());
        }
        ReplCommand::Set { key, value } => {
            if let Err(e) = session.set_config(&key, &value) {
                eprintln!("{e}");
            }
        }
        ReplCommand::Help => eprintln!("{HELP}"),
        ReplCommand::Quit => {}
    }
    Ok(())
}
