use serde::{Deserialize, Serialize};

use crate::args::{qualified_path, OptionArity, ROOT_PROJECT};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Tasks that can be selected from the command line.
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set (default: "warn").
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// A task declared in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Task name as typed on the command line (e.g., "test").
    pub name: String,
    /// Owning project path (default: ":").
    #[serde(default = "default_project")]
    pub project: String,
    /// Options the task accepts.
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

/// One option of a declared task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: OptionKind,
    /// Allowed values for `type = "choice"`.
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Value type of a declared option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Flag,
    #[default]
    String,
    Integer,
    Choice,
}

impl OptionKind {
    pub fn arity(self) -> OptionArity {
        match self {
            OptionKind::Flag => OptionArity::NoValue,
            OptionKind::String | OptionKind::Integer | OptionKind::Choice => {
                OptionArity::RequiresValue
            }
        }
    }
}

impl TargetConfig {
    /// Fully qualified task path (e.g., ":app:test").
    pub fn path(&self) -> String {
        qualified_path(&self.project, &self.name)
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_project() -> String {
    ROOT_PROJECT.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
