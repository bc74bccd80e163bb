//! taskline: configure several tasks from one command line.
//!
//! Each selected task parses the same tokens with its own options; the
//! tokens none of them claim name the next tasks to run.

pub mod args;
pub mod catalog;
pub mod chain;
pub mod config;
pub mod logging;

pub use chain::{run, RunError};
