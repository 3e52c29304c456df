//! `otprelay check config`: validate a configuration file.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Validate the configuration file without starting the relay.
pub fn execute<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(summary_json(path, &config));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Interval", format!("{}s", config.interval_secs));
    output::field("Feeds", config.feeds.len());
    output::field("Channels", config.channels.len());
    output::field("Store", config.store.backend.as_str());
    output::field("Replay", config.cold_start.replay_latest);
    output::field("Dry run", config.dry_run);

    if !config.telegram.enabled {
        output::field("Telegram", "disabled");
    } else if config.telegram_token.is_some() {
        output::success("Telegram bot token detected");
    } else if config.delivers_to_telegram() {
        output::warning("Telegram enabled but the bot token is missing");
        output::hint("set TELEGRAM_BOT_TOKEN in the environment or .env");
    } else {
        output::note("No bot token; dry-run notifications are logged");
    }

    output::success("Configuration check complete");
    Ok(())
}

fn summary_json(path: &Path, config: &Config) -> serde_json::Value {
    json!({
        "type": "check_config",
        "payload": {
            "config": path.display().to_string(),
            "valid": true,
            "interval_secs": config.interval_secs,
            "feeds": config.feeds.iter().map(|feed| feed.label.as_str()).collect::<Vec<_>>(),
            "channels": config.channels.iter().map(|channel| channel.id.as_str()).collect::<Vec<_>>(),
            "store": config.store.backend.as_str(),
            "replay_latest": config.cold_start.replay_latest,
            "dry_run": config.dry_run,
            "telegram_enabled": config.telegram.enabled,
            "telegram_token_present": config.telegram_token.is_some(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        interval_secs = 10

        [[feeds]]
        label = "API 1"
        url = "https://feeds.example.com/one"

        [[feeds]]
        label = "API 2"
        url = "https://feeds.example.com/two"

        [[channels]]
        id = "-100123"

        [[channels]]
        id = "@otp"
        flat_text = true

        [store]
        backend = "memory"
    "#;

    #[test]
    fn summary_lists_feeds_and_channels_in_order() {
        let config = Config::parse_toml(CONFIG).unwrap();

        let summary = summary_json(Path::new("relay.toml"), &config);
        let payload = &summary["payload"];

        assert_eq!(summary["type"], "check_config");
        assert_eq!(payload["config"], "relay.toml");
        assert_eq!(payload["interval_secs"], 10);
        assert_eq!(payload["feeds"], json!(["API 1", "API 2"]));
        assert_eq!(payload["channels"], json!(["-100123", "@otp"]));
        assert_eq!(payload["store"], "memory");
    }

    #[test]
    fn invalid_file_is_reported_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "interval_secs = 0\n").unwrap();

        assert!(execute(&path).is_err());
    }
}
