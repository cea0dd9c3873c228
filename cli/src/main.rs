mod commands;
mod terminal;

use std::process::ExitCode;

use bamctl_common::config::Settings;
use bamctl_core::BamApi;
use clap::Parser;
use commands::{CommandLine, Commands, add, delete, list, update};
use terminal::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands: CommandLine = match CommandLine::try_parse() {
        Ok(commands) => commands,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(commands.debug);

    match run(commands).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(commands: CommandLine) -> anyhow::Result<()> {
    let settings: Settings = Settings::from_env()?.with_overrides(commands.overrides());
    let api: BamApi = BamApi::open(settings).await?;

    let outcome: anyhow::Result<()> = match commands.command {
        Commands::List(args) => list::list(&api, args).await,
        Commands::Add(args) => add::add(&api, args).await,
        Commands::Delete(args) => delete::delete(&api, args).await,
        Commands::Update(args) => update::update(&api, args).await,
    };

    api.close().await;
    outcome
}
