//! Handler for the `run` command.

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = load_run_config(args)?;
    config.init_logging();

    if !output::is_quiet() || output::is_json() {
        print_startup_config(&config);
    }

    info!(
        feeds = config.feeds.len(),
        channels = config.channels.len(),
        interval_secs = config.interval_secs,
        "otprelay starting"
    );

    let runtime = bootstrap::start(&config)?;
    wait_for_shutdown().await;
    runtime.shutdown().await;

    info!("otprelay stopped");
    Ok(())
}

/// Load the config file and apply command-line overrides.
fn load_run_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load(&args.config)?;
    apply_run_overrides(&mut config, args, output::is_json());
    Ok(config)
}

fn apply_run_overrides(config: &mut Config, args: &RunArgs, force_json_logs: bool) {
    if args.dry_run {
        config.dry_run = true;
    }
    config
        .logging
        .apply_overrides(args.log_level.as_deref(), args.json_logs || force_json_logs);
}

#[cfg(unix)]
async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal as unix_signal, SignalKind};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = signal::ctrl_c() => info!("Shutdown signal received (Ctrl+C)"),
                _ = terminate.recv() => info!("Shutdown signal received (SIGTERM)"),
            }
        }
        Err(_) => {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received (Ctrl+C)");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() {
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received (Ctrl+C)");
}

fn print_startup_config(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Feeds", config.feeds.len());
    output::field("Channels", config.channels.len());
    output::field("Interval", format!("{}s", config.interval_secs));
    output::field("Store", config.store.backend.as_str());
    if output::verbosity() > 0 {
        output::field("Database", &config.database);
        for feed in &config.feeds {
            output::field("Feed", format!("{} ({})", feed.label, feed.url));
        }
    }

    if config.dry_run {
        output::warning("Dry-run mode enabled - notifications will only be logged");
    } else if !config.telegram.enabled {
        output::warning("Telegram disabled - notifications will only be logged");
    }
}
