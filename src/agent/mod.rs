//! Planner → architect → coder agent that writes a project into the
//! workspace root, one counted step per node execution.

pub mod nodes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use crate::{
    config::AgentConfig,
    core::{
        domain::{InvokeOptions, WorkflowInput, WorkflowOutput, WorkspaceRoot},
        ports::{AgentWorkflow, FileSystem, LlmClient, LlmOptions, PromptRenderer},
    },
};

use nodes::NodeRuntime;
use state::{AgentState, Node, StepBudget};

/// Factory for the LLM client. Called lazily on each invocation so that a
/// missing credential surfaces as a workflow failure.
pub type LlmClientFactory = Arc<dyn Fn() -> anyhow::Result<Arc<dyn LlmClient>> + Send + Sync>;

pub struct CodingAgent {
    settings: AgentConfig,
    root: WorkspaceRoot,
    llm_factory: LlmClientFactory,
    renderer: Arc<dyn PromptRenderer>,
    file_system: Arc<dyn FileSystem>,
}

impl CodingAgent {
    pub fn new(
        settings: AgentConfig,
        root: WorkspaceRoot,
        llm_factory: LlmClientFactory,
        renderer: Arc<dyn PromptRenderer>,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            settings,
            root,
            llm_factory,
            renderer,
            file_system,
        }
    }

    fn runtime(&self) -> anyhow::Result<NodeRuntime> {
        let llm = (self.llm_factory)().context("Failed to initialise the LLM client")?;
        Ok(NodeRuntime {
            llm,
            renderer: self.renderer.clone(),
            file_system: self.file_system.clone(),
            root: self.root.clone(),
            model: self.settings.resolved_model(),
            options: LlmOptions {
                temperature: self.settings.temperature,
            },
            templates: self.settings.templates.clone(),
        })
    }
}

#[async_trait]
impl AgentWorkflow for CodingAgent {
    async fn invoke(
        &self,
        input: &WorkflowInput,
        options: &InvokeOptions,
    ) -> anyhow::Result<WorkflowOutput> {
        let runtime = self.runtime()?;
        let mut state = AgentState::new(input.user_prompt.clone());
        let mut budget = StepBudget::new(options.recursion_limit);
        let mut node = Node::Planner;

        while node != Node::End {
            let step = budget.consume()?;
            info!(step, node = node.as_str(), "Agent step");
            node = match node {
                Node::Planner => {
                    runtime
                        .plan(&mut state)
                        .await
                        .context("Planner step failed")?;
                    Node::Architect
                }
                Node::Architect => {
                    runtime
                        .architect(&mut state)
                        .await
                        .context("Architect step failed")?;
                    Node::Coder
                }
                Node::Coder => {
                    let filepath = state
                        .current_task()
                        .map(|task| task.filepath.clone())
                        .unwrap_or_default();
                    runtime
                        .code(&mut state)
                        .await
                        .with_context(|| format!("Coder step failed for {filepath}"))?;
                    state.next_task += 1;
                    if state.current_task().is_some() {
                        Node::Coder
                    } else {
                        Node::End
                    }
                }
                Node::End => Node::End,
            };
        }

        Ok(WorkflowOutput {
            steps_taken: budget.taken(),
            files_written: state.files_written,
        })
    }
}
