use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::{Error, Result};

/// Remediation checklist shown on every workflow failure.
pub const REMEDIATION_HINTS: [&str; 3] = [
    "Make sure your .env file has GROQ_API_KEY set",
    "Check if all dependencies are installed",
    "Try reducing --recursion-limit if hitting limits",
];

/// A validated request for one agent workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    user_prompt: String,
    recursion_limit: u32,
}

impl InvocationRequest {
    /// Validates the prompt and ceiling. The prompt is kept as typed; only
    /// the blank check looks at its trimmed form.
    pub fn new(user_prompt: impl Into<String>, recursion_limit: u32) -> Result<Self> {
        let user_prompt = user_prompt.into();
        if user_prompt.trim().is_empty() {
            return Err(Error::InvalidInput("Empty prompt provided".into()));
        }
        if recursion_limit == 0 {
            return Err(Error::InvalidInput(
                "Recursion limit must be at least 1".into(),
            ));
        }
        Ok(Self {
            user_prompt,
            recursion_limit,
        })
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Absolute, writable directory that receives generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot(PathBuf);

impl WorkspaceRoot {
    /// Wraps a path that the caller has already verified. Tests use this to
    /// inject a stub root without touching the file system.
    pub fn from_verified(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl std::fmt::Display for WorkspaceRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Semantic input handed to the agent workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowInput {
    pub user_prompt: String,
}

/// Execution options handed to the agent workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokeOptions {
    pub recursion_limit: u32,
}

/// Whatever a completed workflow hands back. The runner never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowOutput {
    pub steps_taken: u32,
    pub files_written: Vec<PathBuf>,
}

/// Diagnostic captured when the workflow raised an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub summary: String,
    pub diagnostic: String,
    pub hints: Vec<&'static str>,
}

impl FailureReport {
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            summary: err.to_string(),
            diagnostic: format!("{err:?}"),
            hints: REMEDIATION_HINTS.to_vec(),
        }
    }
}

/// Three-way classification produced once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Success(WorkflowOutput),
    Cancelled,
    Failed(FailureReport),
}

impl InvocationOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            InvocationOutcome::Success(_) | InvocationOutcome::Cancelled => 0,
            InvocationOutcome::Failed(_) => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationOutcome::Success(_) => "success",
            InvocationOutcome::Cancelled => "cancelled",
            InvocationOutcome::Failed(_) => "failed",
        }
    }
}
