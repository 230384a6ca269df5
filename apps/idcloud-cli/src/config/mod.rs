//! Configuration management for the idcloud CLI

mod paths;
mod settings;

pub use paths::ConfigPaths;
pub use settings::Config;

/// Realm used when neither flags nor the config file name one
pub const DEFAULT_REALM: &str = "alpha";
