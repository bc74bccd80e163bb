//! Tasks declared in the config file, and the catalog advertising their options.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::args::{
    option_flag, qualified_path, to_choice, to_integer, OptionCatalog, OptionDescriptor, Target,
};
use crate::config::{Config, OptionConfig, OptionKind, TargetConfig};

/// A value applied to a declared task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Flag(value) => write!(f, "{}", value),
            BoundValue::Integer(value) => write!(f, "{}", value),
            BoundValue::Text(value) => f.write_str(value),
        }
    }
}

/// A task instance selected for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredTarget {
    path: String,
    name: String,
    project: String,
    options: BTreeMap<String, BoundValue>,
}

impl DeclaredTarget {
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        let name = name.into();
        let project = project.into();
        Self {
            path: qualified_path(&project, &name),
            name,
            project,
            options: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &TargetConfig) -> Self {
        Self::new(config.name.as_str(), config.project.as_str())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Value applied for `option`, if any.
    pub fn value(&self, option: &str) -> Option<&BoundValue> {
        self.options.get(option)
    }

    /// All applied options, sorted by name.
    pub fn options(&self) -> &BTreeMap<String, BoundValue> {
        &self.options
    }

    pub fn set(&mut self, option: &str, value: BoundValue) {
        self.options.insert(option.to_string(), value);
    }

    /// The task with its applied options, e.g. `:app:test --rerun --tests=Foo`.
    pub fn command_line(&self) -> String {
        let mut line = self.path.clone();
        for (name, value) in &self.options {
            line.push(' ');
            line.push_str(&option_flag(name));
            if !matches!(value, BoundValue::Flag(_)) {
                line.push('=');
                line.push_str(&value.to_string());
            }
        }
        line
    }
}

impl Target for DeclaredTarget {
    fn path(&self) -> String {
        self.path.clone()
    }
}

/// Option catalog backed by the `[[targets]]` tables of the config.
#[derive(Debug, Clone, Default)]
pub struct DeclaredCatalog {
    options: HashMap<String, Vec<OptionConfig>>,
}

impl DeclaredCatalog {
    pub fn from_config(config: &Config) -> Self {
        let options = config
            .targets
            .iter()
            .map(|target| (target.path(), target.options.clone()))
            .collect();
        Self { options }
    }
}

impl OptionCatalog<DeclaredTarget> for DeclaredCatalog {
    fn options(&self, target: &DeclaredTarget) -> Vec<OptionDescriptor<DeclaredTarget>> {
        self.options
            .get(&target.path)
            .map(|options| options.iter().map(descriptor).collect())
            .unwrap_or_default()
    }
}

/// Build the descriptor for a declared option; the binder stores the
/// converted value under the option name.
fn descriptor(option: &OptionConfig) -> OptionDescriptor<DeclaredTarget> {
    let name = option.name.clone();
    let description = option.description.clone();

    match option.kind {
        OptionKind::Flag => {
            let key = name.clone();
            OptionDescriptor::flag(name, description, move |target: &mut DeclaredTarget| {
                target.set(&key, BoundValue::Flag(true));
            })
        }
        OptionKind::String => {
            let key = name.clone();
            OptionDescriptor::value(name, description, move |target: &mut DeclaredTarget, value: &str| {
                target.set(&key, BoundValue::Text(value.to_string()));
                Ok(())
            })
        }
        OptionKind::Integer => {
            let key = name.clone();
            OptionDescriptor::value(name, description, move |target: &mut DeclaredTarget, value: &str| {
                target.set(&key, BoundValue::Integer(to_integer(value)?));
                Ok(())
            })
        }
        OptionKind::Choice => {
            let key = name.clone();
            let choices = option.choices.clone();
            OptionDescriptor::value(name, description, move |target: &mut DeclaredTarget, value: &str| {
                let choice = to_choice(value, &choices)?;
                target.set(&key, BoundValue::Text(choice.to_string()));
                Ok(())
            })
        }
    }
}
