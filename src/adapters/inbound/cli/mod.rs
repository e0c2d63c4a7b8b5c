//! CLI inbound adapter that drives one run from workspace setup to the
//! reported outcome.

mod report;

pub use report::Reporter;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;

use crate::{
    application::{WorkflowRunner, WorkspaceInitializer},
    core::{
        domain::{InvocationRequest, WorkspaceRoot},
        ports::AgentWorkflow,
    },
    signals::{CancellationToken, with_cancellation},
};

/// Builds the agent workflow once the workspace root is known.
pub type WorkflowFactory = Arc<dyn Fn(&WorkspaceRoot) -> Arc<dyn AgentWorkflow> + Send + Sync>;

/// Source of the interactive prompt when `--prompt` is absent.
pub trait PromptReader: Send + Sync {
    fn read_prompt(&self) -> io::Result<String>;
}

/// Reads one line from standard input.
#[derive(Debug, Default)]
pub struct StdinPromptReader;

impl PromptReader for StdinPromptReader {
    fn read_prompt(&self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// CLI adapter that wires the initializer, the prompt and the runner together.
pub struct CliAdapter<O: Write, E: Write> {
    initializer: WorkspaceInitializer,
    workflow_factory: WorkflowFactory,
    prompt_reader: Arc<dyn PromptReader>,
    reporter: Reporter<O, E>,
}

impl<O: Write, E: Write> CliAdapter<O, E> {
    pub fn new(
        initializer: WorkspaceInitializer,
        workflow_factory: WorkflowFactory,
        prompt_reader: Arc<dyn PromptReader>,
        reporter: Reporter<O, E>,
    ) -> Self {
        Self {
            initializer,
            workflow_factory,
            prompt_reader,
            reporter,
        }
    }

    pub fn into_reporter(self) -> Reporter<O, E> {
        self.reporter
    }

    /// Runs once and returns the process exit code. `Err` only covers
    /// console write failures.
    pub async fn execute(
        &mut self,
        prompt: Option<String>,
        recursion_limit: u32,
        cancel: &CancellationToken,
    ) -> Result<u8> {
        let root = match self.initializer.init_workspace() {
            Ok(root) => root,
            Err(err) => {
                tracing::error!(error = %err, "Workspace initialization failed");
                self.reporter.error(&err.to_string())?;
                return Ok(1);
            }
        };
        self.reporter.banner(&root)?;

        let prompt = match prompt {
            Some(prompt) => prompt,
            None => match self.read_prompt(cancel).await? {
                Some(prompt) => prompt,
                None => {
                    self.reporter.cancelled()?;
                    return Ok(0);
                }
            },
        };

        let request = match InvocationRequest::new(prompt, recursion_limit) {
            Ok(request) => request,
            Err(err) => {
                self.reporter.error(&err.to_string())?;
                return Ok(1);
            }
        };
        self.reporter.starting(&request)?;

        let runner = WorkflowRunner::new((self.workflow_factory)(&root));
        let outcome = runner.run(&request, cancel).await;
        self.reporter.outcome(&outcome, &root)?;
        Ok(outcome.exit_code())
    }

    /// `Ok(None)` means the user interrupted while typing.
    async fn read_prompt(&mut self, cancel: &CancellationToken) -> Result<Option<String>> {
        self.reporter.ask_for_prompt()?;
        let reader = self.prompt_reader.clone();
        let read = tokio::task::spawn_blocking(move || reader.read_prompt());
        match with_cancellation(cancel, read).await {
            None => Ok(None),
            Some(joined) => Ok(Some(joined??)),
        }
    }
}
