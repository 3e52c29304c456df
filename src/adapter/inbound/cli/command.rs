//! Command-line interface definitions.
//!
//! Defines the CLI structure for otprelay using `clap`: running the relay,
//! diagnostic checks and seen-set maintenance.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Poll OTP feeds and relay new records to Telegram channels
#[derive(Parser, Debug)]
#[command(name = "otprelay")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply the choice to all styled output.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Top-level subcommands for the otprelay CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the relay in the foreground until interrupted
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Inspect and maintain the seen-set database
    #[command(subcommand)]
    Store(StoreCommand),
}

/// Subcommands for `otprelay check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Fetch and parse every feed once without touching the seen-set.
    Feeds(ConfigPathArg),
}

/// Subcommands for `otprelay store`.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Show how many keys are stored and how old they are.
    Stats(ConfigPathArg),
    /// Delete marks older than the configured retention window.
    Prune(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
///
/// All optional fields override the corresponding configuration file values.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Log notifications instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "otprelay",
            "run",
            "-c",
            "relay.toml",
            "--dry-run",
            "--log-level",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("relay.toml"));
        assert!(args.dry_run);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["otprelay", "store", "stats", "--json", "-vv"]).unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(matches!(cli.command, Commands::Store(StoreCommand::Stats(_))));
    }

    #[test]
    fn check_feeds_defaults_config_path() {
        let cli = Cli::try_parse_from(["otprelay", "check", "feeds"]).unwrap();

        let Commands::Check(CheckCommand::Feeds(arg)) = cli.command else {
            panic!("expected check feeds");
        };
        assert_eq!(arg.config, paths::default_config());
    }
}
