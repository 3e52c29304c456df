//! Command-line entry points.

pub mod check;
pub mod command;
pub mod output;
pub mod paths;
pub mod run;
pub mod store;

use command::{CheckCommand, Cli, Commands, StoreCommand};

use crate::error::Result;

/// Dispatch a parsed command line to its handler.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute(&arg.config),
        Commands::Check(CheckCommand::Feeds(arg)) => check::feeds::execute(&arg.config).await,
        Commands::Store(StoreCommand::Stats(arg)) => store::execute_stats(&arg.config),
        Commands::Store(StoreCommand::Prune(arg)) => store::execute_prune(&arg.config).await,
    }
}
