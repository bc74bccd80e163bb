//! Command-line tokenizer — raw tokens → matched options + leftover arguments.
//!
//! One parser is built per target, so it only knows the options that target
//! declares. Anything it cannot attribute to a declared option ends up in
//! [`ParsedCommandLine::extra_arguments`], in input order.

use std::collections::HashMap;

use thiserror::Error;

use crate::args::registry::OptionArity;

/// Errors produced while declaring options or parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Unknown command-line option '{option}'.")]
    UnknownOption { option: String },

    #[error("No argument was provided for command-line option '{option}'.")]
    MissingValue { option: String },

    #[error("An empty argument was provided for command-line option '{option}'.")]
    EmptyValue { option: String },

    #[error("Command-line option '{option}' does not take an argument.")]
    UnexpectedValue { option: String },

    #[error("Multiple arguments were provided for command-line option '{option}'.")]
    DuplicateValue { option: String },

    #[error("Option '{name}' is already defined.")]
    DuplicateOption { name: String },

    #[error("'{name}' is not a valid option name.")]
    InvalidOptionName { name: String },
}

/// A declared option slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLineOption {
    name: String,
    description: String,
    arity: OptionArity,
}

impl CommandLineOption {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arity(&self) -> OptionArity {
        self.arity
    }

    /// Canonical spelling on the command line.
    pub fn flag(&self) -> String {
        option_flag(&self.name)
    }
}

/// `-x` for single-letter option names, `--name` otherwise.
pub fn option_flag(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

/// Tokenizer configured with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct CommandLineParser {
    options: Vec<CommandLineOption>,
    by_name: HashMap<String, usize>,
}

/// Position of the parser within the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No positional token seen yet; unknown options are errors.
    BeforeFirstArgument,
    /// Unknown options are kept as leftovers from here on.
    AfterFirstArgument,
    /// `--` was seen; every token is a leftover.
    AfterTerminator,
}

/// Result of looking at one option-like token.
enum Matched<'p> {
    Complete,
    NeedsValue(&'p CommandLineOption, String),
    Unknown(String),
}

impl CommandLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option slot.
    pub fn option(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        arity: OptionArity,
    ) -> Result<(), ArgumentError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(ArgumentError::InvalidOptionName { name });
        }
        if self.by_name.contains_key(&name) {
            return Err(ArgumentError::DuplicateOption { name });
        }

        self.by_name.insert(name.clone(), self.options.len());
        self.options.push(CommandLineOption {
            name,
            description: description.into(),
            arity,
        });
        Ok(())
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> &[CommandLineOption] {
        &self.options
    }

    /// Split `tokens` into matched options and leftover arguments.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParsedCommandLine, ArgumentError> {
        let mut parsed = ParsedCommandLine::default();
        let mut phase = Phase::BeforeFirstArgument;
        let mut pending: Option<(&CommandLineOption, String)> = None;

        for token in tokens.iter().map(<S as AsRef<str>>::as_ref) {
            if let Some((option, written)) = pending.take() {
                if looks_like_option(token) {
                    return Err(ArgumentError::MissingValue { option: written });
                }
                parsed.record_value(option, &written, token)?;
                continue;
            }

            if phase == Phase::AfterTerminator || !looks_like_option(token) {
                parsed.extra.push(token.to_string());
                if phase == Phase::BeforeFirstArgument {
                    phase = Phase::AfterFirstArgument;
                }
                continue;
            }

            if token == "--" {
                phase = Phase::AfterTerminator;
                continue;
            }

            let matched = match token.strip_prefix("--") {
                Some(body) => self.match_long(body, &mut parsed)?,
                None => self.match_short(&token[1..], &mut parsed)?,
            };

            match matched {
                Matched::Complete => {}
                Matched::NeedsValue(option, written) => pending = Some((option, written)),
                Matched::Unknown(option) => {
                    if phase == Phase::BeforeFirstArgument {
                        return Err(ArgumentError::UnknownOption { option });
                    }
                    parsed.extra.push(token.to_string());
                }
            }
        }

        if let Some((_, written)) = pending {
            return Err(ArgumentError::MissingValue { option: written });
        }

        Ok(parsed)
    }

    fn lookup(&self, name: &str) -> Option<&CommandLineOption> {
        self.by_name.get(name).map(|&idx| &self.options[idx])
    }

    /// `--name` or `--name=value`.
    fn match_long(
        &self,
        body: &str,
        parsed: &mut ParsedCommandLine,
    ) -> Result<Matched<'_>, ArgumentError> {
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let written = format!("--{}", name);

        match self.lookup(name) {
            Some(option) => complete(option, written, value, parsed),
            None => Ok(Matched::Unknown(written)),
        }
    }

    /// `-x`, `-x=value`, `-xVALUE`, `-abc` (declared name or combined letters).
    fn match_short(
        &self,
        body: &str,
        parsed: &mut ParsedCommandLine,
    ) -> Result<Matched<'_>, ArgumentError> {
        let (head, value) = match body.split_once('=') {
            Some((head, value)) => (head, Some(value)),
            None => (body, None),
        };
        if let Some(option) = self.lookup(head) {
            return complete(option, format!("-{}", head), value, parsed);
        }

        // Resolve every letter before recording anything, so an unknown
        // letter leaves `parsed` untouched.
        let mut flags = Vec::new();
        for (idx, letter) in body.char_indices() {
            let end = idx + letter.len_utf8();
            let written = format!("-{}", letter);
            let Some(option) = self.lookup(&body[idx..end]) else {
                return Ok(Matched::Unknown(written));
            };

            if option.arity.takes_value() {
                for flag in flags.drain(..) {
                    parsed.record_flag(flag);
                }
                let rest = &body[end..];
                if rest.is_empty() {
                    return Ok(Matched::NeedsValue(option, written));
                }
                parsed.record_value(option, &written, rest.strip_prefix('=').unwrap_or(rest))?;
                return Ok(Matched::Complete);
            }
            flags.push(option);
        }

        for flag in flags {
            parsed.record_flag(flag);
        }
        Ok(Matched::Complete)
    }
}

fn complete<'p>(
    option: &'p CommandLineOption,
    written: String,
    value: Option<&str>,
    parsed: &mut ParsedCommandLine,
) -> Result<Matched<'p>, ArgumentError> {
    match (option.arity, value) {
        (OptionArity::NoValue, Some(_)) => Err(ArgumentError::UnexpectedValue { option: written }),
        (OptionArity::NoValue, None) => {
            parsed.record_flag(option);
            Ok(Matched::Complete)
        }
        (OptionArity::RequiresValue, Some(value)) => {
            parsed.record_value(option, &written, value)?;
            Ok(Matched::Complete)
        }
        (OptionArity::RequiresValue, None) => Ok(Matched::NeedsValue(option, written)),
    }
}

fn looks_like_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}

/// Matched options and leftovers of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommandLine {
    options: HashMap<String, Vec<String>>,
    extra: Vec<String>,
}

impl ParsedCommandLine {
    /// Was the option present at least once?
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Captured values of an option; empty for flags.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.options.get(name).map(Vec::as_slice)
    }

    /// Tokens not claimed by any declared option, in input order.
    pub fn extra_arguments(&self) -> &[String] {
        &self.extra
    }

    pub fn into_extra_arguments(self) -> Vec<String> {
        self.extra
    }

    fn record_flag(&mut self, option: &CommandLineOption) {
        self.options.entry(option.name.clone()).or_default();
    }

    fn record_value(
        &mut self,
        option: &CommandLineOption,
        written: &str,
        value: &str,
    ) -> Result<(), ArgumentError> {
        if value.is_empty() {
            return Err(ArgumentError::EmptyValue {
                option: written.to_string(),
            });
        }
        let values = self.options.entry(option.name.clone()).or_default();
        if !values.is_empty() {
            return Err(ArgumentError::DuplicateValue {
                option: written.to_string(),
            });
        }
        values.push(value.to_string());
        Ok(())
    }
}
