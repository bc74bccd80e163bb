//! Command-line configuration of targets.
//!
//! ```text
//! Requests → Partition → Parse (per target) → Bind → Agree on leftovers → Requests
//! ```
//!
//! Each target gets its own [`CommandLineParser`] built from the descriptors
//! its [`OptionCatalog`] advertises. The [`Dispatcher`] ties the stages
//! together.

mod convert;
mod dispatcher;
mod error;
mod parser;
mod registry;
mod request;

pub use convert::{to_choice, to_integer, ConversionError};
pub use dispatcher::Dispatcher;
pub use error::ConfigureError;
pub use parser::{
    option_flag, ArgumentError, CommandLineOption, CommandLineParser, ParsedCommandLine,
};
pub use registry::{Binder, OptionArity, OptionCatalog, OptionDescriptor, Target};
pub use request::{qualified_path, ExecutionRequest, ROOT_PROJECT};
