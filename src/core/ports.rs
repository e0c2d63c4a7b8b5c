use std::path::Path;

use async_trait::async_trait;

use crate::core::domain::{InvokeOptions, WorkflowInput, WorkflowOutput};
use crate::core::error::Result;

/// The external, iterative agent process the CLI drives.
///
/// Implementations must fail (not truncate) once `options.recursion_limit`
/// steps have run without reaching a stop condition.
#[async_trait]
pub trait AgentWorkflow: Send + Sync {
    async fn invoke(
        &self,
        input: &WorkflowInput,
        options: &InvokeOptions,
    ) -> anyhow::Result<WorkflowOutput>;
}

/// Abstraction for interacting with an LLM provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request.
    async fn chat_completion(
        &self,
        model: &str,
        prompt: &str,
        options: &LlmOptions,
    ) -> Result<String>;
}

/// Options for an LLM request.
#[derive(Debug, Clone, Default)]
pub struct LlmOptions {
    pub temperature: Option<f32>,
}

/// Abstraction for rendering prompt templates.
pub trait PromptRenderer: Send + Sync {
    /// Render a template with the given data.
    fn render(&self, template: &str, data: &serde_json::Value) -> Result<String>;
}

/// Abstraction for file system operations.
pub trait FileSystem: Send + Sync {
    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write a string to a file, creating parent directories.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Check if a file exists.
    fn exists(&self, path: &Path) -> bool;
    /// Check if a path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;
}
