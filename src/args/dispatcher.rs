//! Dispatcher — one command line, several targets.
//!
//! ```text
//! requests → partition → (parse + bind) per target → agree on leftovers → reassemble
//! ```
//!
//! Every selected target parses the same raw tokens with its own parser.
//! Whatever none of its options claim is handed back as bare requests, so the
//! caller can run those names next.

use crate::args::error::ConfigureError;
use crate::args::parser::CommandLineParser;
use crate::args::registry::{OptionCatalog, Target};
use crate::args::request::ExecutionRequest;

/// Configures targets from command-line requests using an option catalog.
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    catalog: C,
}

impl<C> Dispatcher<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Apply the options in `requests` to every target and return the
    /// requests that remain to be run.
    ///
    /// Leading bare requests are read as raw tokens; the first scoped request
    /// and everything after it pass through untouched. The leftovers of the
    /// raw tokens come back first, as bare requests, followed by the
    /// passthrough requests.
    ///
    /// # Panics
    ///
    /// Panics if `targets` is empty, or if two targets disagree on which raw
    /// tokens are leftovers.
    pub fn dispatch<'t, T, I>(
        &self,
        targets: I,
        requests: Vec<ExecutionRequest>,
    ) -> Result<Vec<ExecutionRequest>, ConfigureError>
    where
        T: Target + ?Sized + 't,
        C: OptionCatalog<T>,
        I: IntoIterator<Item = &'t mut T>,
    {
        let mut targets: Vec<&'t mut T> = targets.into_iter().collect();
        assert!(
            !targets.is_empty(),
            "at least one target must be selected before configuring it from the command line"
        );
        if requests.is_empty() {
            return Ok(requests);
        }

        let (raw_tokens, passthrough) = partition(requests);
        tracing::debug!(
            targets = targets.len(),
            raw_tokens = raw_tokens.len(),
            passthrough = passthrough.len(),
            "Configuring targets from command line"
        );
        tracing::trace!(?raw_tokens, "Raw command-line tokens");

        let mut agreed: Option<(String, Vec<String>)> = None;
        for target in targets.iter_mut() {
            let residue = self.configure(&mut **target, &raw_tokens)?;
            if let Some((first, expected)) = &agreed {
                // Checked in release builds too.
                if *expected != residue {
                    panic!(
                        "tasks {} and {} disagree on the remaining command-line arguments: {:?} vs {:?}",
                        first,
                        target.path(),
                        expected,
                        residue
                    );
                }
                continue;
            }
            agreed = Some((target.path(), residue));
        }

        let residue = agreed.map(|(_, residue)| residue).unwrap_or_default();
        tracing::debug!(?residue, "Remaining command-line arguments");

        Ok(residue
            .into_iter()
            .map(ExecutionRequest::bare)
            .chain(passthrough)
            .collect())
    }

    /// Parse `raw_tokens` for one target, apply what matched, return the
    /// leftovers.
    fn configure<T>(&self, target: &mut T, raw_tokens: &[String]) -> Result<Vec<String>, ConfigureError>
    where
        T: Target + ?Sized,
        C: OptionCatalog<T>,
    {
        let descriptors = self.catalog.options(target);

        let mut parser = CommandLineParser::new();
        for descriptor in &descriptors {
            parser
                .option(descriptor.name(), descriptor.description(), descriptor.arity())
                .map_err(|source| ConfigureError::Catalog {
                    target: target.path(),
                    source,
                })?;
        }

        let parsed = parser
            .parse(raw_tokens)
            .map_err(|source| ConfigureError::Parse {
                target: target.path(),
                source,
            })?;

        for descriptor in &descriptors {
            let Some(values) = parsed.values(descriptor.name()) else {
                continue;
            };
            tracing::debug!(
                task = %target.path(),
                option = descriptor.name(),
                ?values,
                "Applying command-line option"
            );
            descriptor
                .apply(target, values)
                .map_err(|source| ConfigureError::Bind {
                    target: target.path(),
                    option: descriptor.name().to_string(),
                    source,
                })?;
        }

        Ok(parsed.into_extra_arguments())
    }
}

/// Split requests into raw tokens (leading bare names) and passthrough
/// (first scoped request onwards).
fn partition(requests: Vec<ExecutionRequest>) -> (Vec<String>, Vec<ExecutionRequest>) {
    let mut raw_tokens = Vec::new();
    let mut requests = requests.into_iter();
    let mut passthrough = Vec::new();

    for request in requests.by_ref() {
        match request {
            ExecutionRequest::Bare { name } => raw_tokens.push(name),
            scoped @ ExecutionRequest::Scoped { .. } => {
                passthrough.push(scoped);
                break;
            }
        }
    }
    passthrough.extend(requests);

    (raw_tokens, passthrough)
}
