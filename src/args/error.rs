//! Errors raised while configuring targets from the command line.

use thiserror::Error;

use crate::args::convert::ConversionError;
use crate::args::parser::ArgumentError;

/// Errors that abort a dispatch.
#[derive(Debug, Error)]
pub enum ConfigureError {
    /// A token could not be assigned by the target's parser.
    #[error("Problem configuring task {target} from command line.")]
    Parse {
        target: String,
        #[source]
        source: ArgumentError,
    },

    /// A matched option could not be applied to the target.
    #[error("Problem configuring option '{option}' on task '{target}' from command line.")]
    Bind {
        target: String,
        option: String,
        #[source]
        source: ConversionError,
    },

    /// The target advertised an option the parser cannot declare.
    #[error("Task {target} declares an invalid command-line option.")]
    Catalog {
        target: String,
        #[source]
        source: ArgumentError,
    },
}

impl ConfigureError {
    /// Path of the target that failed.
    pub fn target(&self) -> &str {
        match self {
            ConfigureError::Parse { target, .. }
            | ConfigureError::Bind { target, .. }
            | ConfigureError::Catalog { target, .. } => target,
        }
    }
}
