//! Infrastructure layer: the in-memory entity store, statistics and config.

pub mod config;
pub mod statistics;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use statistics::Statistics;
pub use store::EntityStore;
