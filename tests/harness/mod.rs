#![allow(dead_code)]

pub mod temp_db;

use std::sync::Arc;
use std::time::Duration;

use otprelay::application::{ColdStartPolicy, DedupEngine, Dispatcher, Pipeline};
use otprelay::domain::{Channel, Feed};
use otprelay::port::{ChannelSender, RecordSource, SeenStore};

pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Pipeline over `feeds`, delivering to `channels` through `sender`.
pub fn pipeline(
    feeds: Vec<Feed>,
    source: Arc<dyn RecordSource>,
    store: Box<dyn SeenStore>,
    sender: Arc<dyn ChannelSender>,
    channels: Vec<Channel>,
    replay_latest: bool,
) -> Pipeline {
    let dispatcher = Arc::new(Dispatcher::new(sender, channels, SEND_TIMEOUT));
    Pipeline::new(
        feeds,
        source,
        DedupEngine::new(store),
        dispatcher,
        ColdStartPolicy { replay_latest },
    )
}

/// Two channels: one rich, one flattened.
pub fn channels() -> Vec<Channel> {
    vec![Channel::new("-100123"), Channel::new("@otp").flat()]
}
