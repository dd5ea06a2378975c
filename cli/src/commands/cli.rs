use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Run phpspec and show a condensed summary of its output")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Read settings from this file instead of discovering `specview.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root. Can be specified multiple times; defaults to the
    /// current directory.
    #[arg(long = "project", action = clap::ArgAction::Append, global = true)]
    pub projects: Vec<PathBuf>,

    /// Output view: text, html or jsonl.
    #[arg(long, global = true)]
    pub output: Option<String>,

    /// Override a setting (KEY=VALUE). Can be specified multiple times.
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub set: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the spec of FILE, or the whole suite, and exit with phpspec's code.
    Run(RunArgs),
    /// Read actions from stdin until `quit`.
    Session(SessionArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    pub file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SessionArgs {
    /// File to treat as active when the session starts.
    pub file: Option<PathBuf>,
}
