use clap::Parser;
mod app;
mod commands;
mod logging;
use commands::cli;
use specview_core::api::CliError;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();
    let cfg = app::load_config(&args)?;
    let guard = logging::init(&cfg.logging)?;

    let cli::Args {
        command, projects, ..
    } = args;

    let exit = match command {
        cli::Commands::Run(run_args) => app::run_once(cfg, projects, run_args).await?,
        cli::Commands::Session(session_args) => {
            commands::session::run_interactive(cfg, projects, session_args).await?
        }
    };

    // flush the non-blocking writer before exiting
    drop(guard);
    std::process::exit(exit);
}
