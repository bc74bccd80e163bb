use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::args::CommandLineParser;
use crate::config::types::{Config, OptionKind, TargetConfig};

/// Why a task catalog could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Task catalog used when no `--config` is given: `taskline/config.toml`
    /// under the platform config directory, or under `.` if there is none.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("taskline").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing default file yields `Config::default()` (no tasks).
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            targets = config.targets.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Task paths are unique
    /// - Option names are valid and unique within a task
    /// - `choice` options list their choices, other types list none
    /// - Tasks sharing a name declare the same option names and arities
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut paths = HashSet::new();
        // First task declared under each name, with its option shape.
        let mut shapes: HashMap<&str, (String, BTreeSet<(&str, bool)>)> = HashMap::new();

        for target in &self.targets {
            if target.name.is_empty() {
                return Err(validation("Task name must not be empty".to_string()));
            }
            let path = target.path();
            if !paths.insert(path.clone()) {
                return Err(validation(format!("Task '{}' is declared more than once", path)));
            }

            // Declaring through a parser applies the same name rules the
            // dispatcher will.
            let mut parser = CommandLineParser::new();
            for option in &target.options {
                parser
                    .option(option.name.as_str(), option.description.as_str(), option.kind.arity())
                    .map_err(|e| validation(format!("Task '{}': {}", path, e)))?;

                match (option.kind, option.choices.is_empty()) {
                    (OptionKind::Choice, true) => {
                        return Err(validation(format!(
                            "Task '{}': option '{}' has type 'choice' but no choices",
                            path, option.name
                        )));
                    }
                    (OptionKind::Choice, false) | (_, true) => {}
                    (_, false) => {
                        return Err(validation(format!(
                            "Task '{}': option '{}' lists choices but is not of type 'choice'",
                            path, option.name
                        )));
                    }
                }
            }

            // A bare name selects every task with it; they must split the
            // command line identically.
            let shape: BTreeSet<(&str, bool)> = target
                .options
                .iter()
                .map(|option| (option.name.as_str(), option.kind.arity().takes_value()))
                .collect();
            match shapes.get(target.name.as_str()) {
                Some((first, expected)) if *expected != shape => {
                    return Err(validation(format!(
                        "Tasks '{}' and '{}' share a name but declare different options",
                        first, path
                    )));
                }
                Some(_) => {}
                None => {
                    shapes.insert(target.name.as_str(), (path, shape));
                }
            }
        }

        Ok(())
    }

    /// Declared tasks matching `name`, in declaration order.
    pub fn targets_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TargetConfig> + 'a {
        self.targets.iter().filter(move |t| t.name == name)
    }
}

fn validation(message: String) -> ConfigError {
    ConfigError::ValidationError { message }
}
