//! Option registry — what a target advertises about its command-line options.

use std::fmt;
use std::sync::Arc;

use crate::args::convert::ConversionError;

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionArity {
    /// Boolean flag, no value (e.g., --rerun).
    NoValue,
    /// Requires exactly one value (e.g., --tests <FILTER>).
    RequiresValue,
}

impl OptionArity {
    /// Does the parser need to capture a value for this option?
    pub fn takes_value(self) -> bool {
        matches!(self, OptionArity::RequiresValue)
    }
}

/// Something options can be applied to, such as a build task.
///
/// The dispatcher never looks inside a target; it only needs an identity
/// for error messages and logs.
pub trait Target {
    /// Fully qualified path of the target (e.g., ":app:test").
    fn path(&self) -> String;
}

/// Applies parsed values onto a target.
pub type Binder<T> = Arc<dyn Fn(&mut T, &[String]) -> Result<(), ConversionError> + Send + Sync>;

/// A single option advertised by a target.
pub struct OptionDescriptor<T: ?Sized> {
    name: String,
    description: String,
    arity: OptionArity,
    binder: Binder<T>,
}

impl<T: ?Sized> OptionDescriptor<T> {
    /// Describe an option with an arbitrary binder.
    ///
    /// Flags are applied with an empty value slice, value-taking options
    /// with exactly one value.
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        arity: OptionArity,
        binder: F,
    ) -> Self
    where
        F: Fn(&mut T, &[String]) -> Result<(), ConversionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            arity,
            binder: Arc::new(binder),
        }
    }

    /// A boolean flag; `apply` runs whenever the flag is present.
    pub fn flag<F>(name: impl Into<String>, description: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::new(name, description, OptionArity::NoValue, move |target, _| {
            apply(target);
            Ok(())
        })
    }

    /// A single-valued option; `apply` receives the raw value.
    pub fn value<F>(name: impl Into<String>, description: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut T, &str) -> Result<(), ConversionError> + Send + Sync + 'static,
    {
        Self::new(name, description, OptionArity::RequiresValue, move |target, values| {
            match values {
                [value] => apply(target, value.as_str()),
                _ => Err(ConversionError::WrongValueCount {
                    expected: 1,
                    actual: values.len(),
                }),
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description. Documentation only.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arity(&self) -> OptionArity {
        self.arity
    }

    /// Apply parsed values onto the target.
    pub fn apply(&self, target: &mut T, values: &[String]) -> Result<(), ConversionError> {
        (self.binder)(target, values)
    }
}

impl<T: ?Sized> Clone for OptionDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            arity: self.arity,
            binder: Arc::clone(&self.binder),
        }
    }
}

impl<T: ?Sized> fmt::Debug for OptionDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Looks up the options a target advertises.
///
/// Must be side-effect free and return the same descriptors for the same
/// target for the duration of one dispatch.
pub trait OptionCatalog<T: ?Sized> {
    fn options(&self, target: &T) -> Vec<OptionDescriptor<T>>;
}

impl<T: ?Sized, C: OptionCatalog<T> + ?Sized> OptionCatalog<T> for &C {
    fn options(&self, target: &T) -> Vec<OptionDescriptor<T>> {
        (**self).options(target)
    }
}
