//! Chained execution — select tasks by name, configure them, continue with
//! whatever is left on the command line.

use thiserror::Error;

use crate::args::{ConfigureError, Dispatcher, ExecutionRequest};
use crate::catalog::{DeclaredCatalog, DeclaredTarget};
use crate::config::Config;

/// Errors produced while resolving a command line into tasks.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Task '{request}' not found.")]
    TargetNotFound { request: String },

    #[error(transparent)]
    Configure(#[from] ConfigureError),
}

/// Resolve `tokens` into configured tasks, in execution order.
///
/// The first request selects the tasks to configure; the rest of the
/// requests are dispatched across them, and whatever comes back is resolved
/// the same way until nothing is left.
pub fn run<S: AsRef<str>>(config: &Config, tokens: &[S]) -> Result<Vec<DeclaredTarget>, RunError> {
    let dispatcher = Dispatcher::new(DeclaredCatalog::from_config(config));
    let mut requests: Vec<ExecutionRequest> = tokens
        .iter()
        .map(|token| ExecutionRequest::bare(token.as_ref()))
        .collect();
    let mut configured = Vec::new();

    while !requests.is_empty() {
        let selector = requests.remove(0);
        let mut selected = select(config, &selector)?;
        tracing::info!(
            request = %selector,
            tasks = selected.len(),
            "Selected tasks"
        );

        requests = dispatcher.dispatch(selected.iter_mut(), requests)?;
        configured.extend(selected);
    }

    Ok(configured)
}

/// A plain name selects every task with that name; a path such as
/// `:app:test` (or a scoped request) selects the one task in that project.
fn select(config: &Config, request: &ExecutionRequest) -> Result<Vec<DeclaredTarget>, RunError> {
    let request = match request {
        ExecutionRequest::Bare { name } => ExecutionRequest::from_selector(name),
        scoped => scoped.clone(),
    };
    let selected: Vec<DeclaredTarget> = config
        .targets_named(request.name())
        .filter(|target| request.project().map_or(true, |project| target.project == project))
        .map(DeclaredTarget::from_config)
        .collect();

    if selected.is_empty() {
        return Err(RunError::TargetNotFound {
            request: request.to_string(),
        });
    }
    Ok(selected)
}
