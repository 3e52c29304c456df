//! Infrastructure configuration modules.

pub mod http;
pub mod logging;
pub mod settings;
pub mod store;
pub mod telegram;

pub use settings::Config;
