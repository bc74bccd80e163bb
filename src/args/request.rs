//! Execution requests — what to run next.

use std::fmt;

use serde::Serialize;

/// Path of the root project.
pub const ROOT_PROJECT: &str = ":";

/// One entry of the requested work list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionRequest {
    /// Name only; may be re-read as an option token.
    Bare { name: String },
    /// Name qualified with a project path; never re-read.
    Scoped { name: String, project: String },
}

impl ExecutionRequest {
    /// Build a request; the variant follows from whether a non-empty
    /// project qualifier is given.
    pub fn new(name: impl Into<String>, project: Option<&str>) -> Self {
        match project {
            Some(project) if !project.is_empty() => ExecutionRequest::Scoped {
                name: name.into(),
                project: project.to_string(),
            },
            _ => ExecutionRequest::Bare { name: name.into() },
        }
    }

    pub fn bare(name: impl Into<String>) -> Self {
        ExecutionRequest::Bare { name: name.into() }
    }

    pub fn scoped(name: impl Into<String>, project: &str) -> Self {
        Self::new(name, Some(project))
    }

    /// Interpret a task selector.
    ///
    /// `:app:test` → scoped `test` in `:app`, `:test` → scoped `test` in the
    /// root project, anything else → bare. Only for tokens already known to
    /// name a task: command-line tokens stay bare until then, since a
    /// `:`-prefixed token may be an option value.
    pub fn from_selector(token: &str) -> Self {
        if !token.starts_with(':') || token.len() < 2 {
            return Self::bare(token);
        }
        match token.rsplit_once(':') {
            Some((_, "")) => Self::bare(token),
            Some(("", name)) => Self::scoped(name, ROOT_PROJECT),
            Some((project, name)) => Self::scoped(name, project),
            None => Self::bare(token),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExecutionRequest::Bare { name } | ExecutionRequest::Scoped { name, .. } => name,
        }
    }

    pub fn project(&self) -> Option<&str> {
        match self {
            ExecutionRequest::Bare { .. } => None,
            ExecutionRequest::Scoped { project, .. } => Some(project),
        }
    }

    pub fn is_scoped(&self) -> bool {
        matches!(self, ExecutionRequest::Scoped { .. })
    }
}

impl fmt::Display for ExecutionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionRequest::Bare { name } => f.write_str(name),
            ExecutionRequest::Scoped { name, project } => {
                f.write_str(&qualified_path(project, name))
            }
        }
    }
}

/// `:name` for the root project, `project:name` otherwise.
pub fn qualified_path(project: &str, name: &str) -> String {
    if project == ROOT_PROJECT {
        format!(":{}", name)
    } else {
        format!("{}:{}", project, name)
    }
}
