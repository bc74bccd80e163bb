//! Configuration: logging settings and the declared task catalog.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, OptionConfig, OptionKind, TargetConfig};
