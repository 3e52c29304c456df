//! Composition root: turns a [`Config`] into running tasks.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::adapter::outbound::feed::HttpRecordSource;
use crate::adapter::outbound::memory::MemorySeenStore;
use crate::adapter::outbound::notifier::LogSender;
use crate::adapter::outbound::sqlite::SqliteSeenStore;
use crate::application::{DedupEngine, Dispatcher, Pipeline, PollScheduler, SchedulerHandle};
use crate::error::Result;
use crate::infrastructure::config::store::StoreBackend;
use crate::infrastructure::config::Config;
use crate::port::{ChannelSender, RecordSource, SeenStore};

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{
    run_command_listener, TelegramControl, TelegramSender,
};
#[cfg(feature = "telegram")]
use teloxide::Bot;

/// SQLite URL for a database path.
#[must_use]
pub fn database_url(path: &str) -> String {
    format!("sqlite://{path}")
}

/// Open the configured seen-set backend.
///
/// # Errors
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_store(config: &Config) -> Result<Box<dyn SeenStore>> {
    match config.store.backend {
        StoreBackend::Sqlite => {
            ensure_parent_dir(Path::new(&config.database))?;
            let store = SqliteSeenStore::open(&database_url(&config.database))?;
            info!(database = %config.database, "SQLite seen-set opened");
            Ok(Box::new(store))
        }
        StoreBackend::Memory => {
            warn!("In-memory seen-set: every restart is a cold start");
            Ok(Box::new(MemorySeenStore::new()))
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(std::fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

/// HTTP feed source from the `[http]` section.
#[must_use]
pub fn build_source(config: &Config) -> Arc<dyn RecordSource> {
    Arc::new(HttpRecordSource::new(config.http.into()))
}

#[cfg(feature = "telegram")]
fn build_bot(config: &Config) -> Result<Option<Bot>> {
    if config.delivers_to_telegram() {
        return Ok(Some(Bot::new(config.require_telegram_token()?)));
    }
    Ok(config.telegram_token.as_deref().map(Bot::new))
}

/// Channel sender: Telegram when delivering, otherwise the log.
#[cfg(feature = "telegram")]
fn build_sender(config: &Config, bot: Option<&Bot>) -> Arc<dyn ChannelSender> {
    match bot {
        Some(bot) if config.delivers_to_telegram() => Arc::new(TelegramSender::new(bot.clone())),
        _ => Arc::new(LogSender),
    }
}

#[cfg(not(feature = "telegram"))]
fn build_sender(config: &Config) -> Arc<dyn ChannelSender> {
    if config.delivers_to_telegram() {
        warn!("Telegram support not compiled in; notifications will only be logged");
    }
    Arc::new(LogSender)
}

/// Assemble the pipeline for `config` around the given adapters.
#[must_use]
pub fn build_pipeline(
    config: &Config,
    source: Arc<dyn RecordSource>,
    store: Box<dyn SeenStore>,
    dispatcher: Arc<Dispatcher>,
) -> Pipeline {
    Pipeline::new(
        config.feeds.clone(),
        source,
        DedupEngine::new(store),
        dispatcher,
        config.cold_start.into(),
    )
}

/// Running relay: the poll scheduler plus the optional command listener.
pub struct Runtime {
    scheduler: SchedulerHandle,
    listener: Option<JoinHandle<()>>,
}

impl Runtime {
    #[must_use]
    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// Stop the listener and the poll loop, abandoning any in-flight cycle.
    pub async fn shutdown(self) {
        if let Some(listener) = self.listener {
            listener.abort();
        }
        if let Some(pipeline) = self.scheduler.shutdown().await {
            match pipeline.dedup().seen_count().await {
                Ok(seen) => info!(seen, "Poll scheduler stopped"),
                Err(err) => warn!(error = %err, "Poll scheduler stopped; seen-set unreadable"),
            }
        }
    }
}

/// Build every component and start the poll loop.
///
/// # Errors
/// Returns an error if the store cannot be opened or Telegram delivery is
/// enabled without a bot token.
pub fn start(config: &Config) -> Result<Runtime> {
    #[cfg(feature = "telegram")]
    let bot = build_bot(config)?;
    #[cfg(feature = "telegram")]
    let sender = build_sender(config, bot.as_ref());
    #[cfg(not(feature = "telegram"))]
    let sender = build_sender(config);

    let store = build_store(config)?;
    let dispatcher = Arc::new(Dispatcher::new(
        sender,
        config.channels.clone(),
        config.telegram.send_timeout(),
    ));
    info!(
        sender = dispatcher.sender_name(),
        channels = dispatcher.channels().len(),
        "Dispatcher ready"
    );

    let pipeline = build_pipeline(config, build_source(config), store, Arc::clone(&dispatcher));
    let scheduler = PollScheduler::new(pipeline, config.scheduler()).start();

    #[cfg(feature = "telegram")]
    let listener = match bot {
        Some(bot) if config.telegram.commands => {
            let control = TelegramControl::new(dispatcher, config.telegram.admin_chats.clone());
            Some(tokio::spawn(run_command_listener(bot, control)))
        }
        None if config.telegram.commands && config.telegram.enabled => {
            warn!("Telegram commands enabled but no bot token set; listener not started");
            None
        }
        _ => None,
    };
    #[cfg(not(feature = "telegram"))]
    let listener = {
        drop(dispatcher);
        None
    };

    Ok(Runtime {
        scheduler,
        listener,
    })
}
