use std::{path::PathBuf, sync::Arc};

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::{
    agent::state::{AgentState, Plan, TaskPlan},
    config::TemplatesConfig,
    core::{
        domain::WorkspaceRoot,
        error::{Error, Result},
        ports::{FileSystem, LlmClient, LlmOptions, PromptRenderer},
    },
    utils::{confine_to_root, extract_json_object, extract_xml_files, snippet},
};

const MISSING_FILE_PLACEHOLDER: &str = "(file does not exist yet)";
const REPLY_SNIPPET_CHARS: usize = 200;

/// Everything a node needs to talk to the model and the project root.
pub struct NodeRuntime {
    pub llm: Arc<dyn LlmClient>,
    pub renderer: Arc<dyn PromptRenderer>,
    pub file_system: Arc<dyn FileSystem>,
    pub root: WorkspaceRoot,
    pub model: String,
    pub options: LlmOptions,
    pub templates: TemplatesConfig,
}

impl NodeRuntime {
    pub async fn plan(&self, state: &mut AgentState) -> Result<()> {
        let prompt = self.renderer.render(
            &self.templates.planner,
            &json!({ "user_prompt": state.user_prompt }),
        )?;
        let reply = self.ask(&prompt).await?;
        let plan: Plan = parse_reply(&reply, "planner")?;
        debug!(
            name = %plan.name,
            files = plan.files.len(),
            "Planner produced plan"
        );
        state.plan = Some(plan);
        Ok(())
    }

    pub async fn architect(&self, state: &mut AgentState) -> Result<()> {
        let plan_json = self.plan_json(state)?;
        let prompt = self
            .renderer
            .render(&self.templates.architect, &json!({ "plan": plan_json }))?;
        let reply = self.ask(&prompt).await?;
        let task_plan: TaskPlan = parse_reply(&reply, "architect")?;
        if task_plan.implementation_steps.is_empty() {
            return Err(Error::AgentProtocol(
                "architect produced no implementation steps".into(),
            ));
        }
        debug!(
            tasks = task_plan.implementation_steps.len(),
            "Architect produced task plan"
        );
        state.tasks = task_plan.implementation_steps;
        state.next_task = 0;
        Ok(())
    }

    /// Implements the current task and writes every file the model returns.
    pub async fn code(&self, state: &mut AgentState) -> Result<()> {
        let task = state
            .current_task()
            .cloned()
            .ok_or_else(|| Error::AgentProtocol("coder ran without a pending task".into()))?;
        let target = confine_to_root(self.root.path(), &task.filepath)?;
        let existing_content = if self.file_system.exists(&target) {
            self.file_system.read_to_string(&target)?
        } else {
            MISSING_FILE_PLACEHOLDER.to_string()
        };

        let prompt = self.renderer.render(
            &self.templates.coder,
            &json!({
                "plan": self.plan_json(state)?,
                "filepath": task.filepath,
                "task_description": task.task_description,
                "existing_content": existing_content,
            }),
        )?;
        let reply = self.ask(&prompt).await?;

        let files = extract_xml_files(&reply);
        if files.is_empty() {
            return Err(Error::AgentProtocol(format!(
                "coder reply for {} contained no <file> blocks: {}",
                task.filepath,
                snippet(&reply, REPLY_SNIPPET_CHARS)
            )));
        }

        for (path, content) in files {
            let dest = confine_to_root(self.root.path(), &path)?;
            self.file_system.write(&dest, &content)?;
            let relative = dest
                .strip_prefix(self.root.path())
                .map(PathBuf::from)
                .unwrap_or_else(|_| dest.clone());
            debug!(path = %relative.display(), bytes = content.len(), "Coder wrote file");
            state.record_written(relative);
        }
        Ok(())
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        self.llm
            .chat_completion(&self.model, prompt, &self.options)
            .await
    }

    fn plan_json(&self, state: &AgentState) -> Result<String> {
        let plan = state
            .plan
            .as_ref()
            .ok_or_else(|| Error::AgentProtocol("no plan available yet".into()))?;
        serde_json::to_string_pretty(plan)
            .map_err(|e| Error::AgentProtocol(format!("failed to serialize plan: {e}")))
    }
}

fn parse_reply<T: DeserializeOwned>(reply: &str, role: &str) -> Result<T> {
    let raw = extract_json_object(reply).ok_or_else(|| {
        Error::AgentProtocol(format!(
            "{role} reply contained no JSON object: {}",
            snippet(reply, REPLY_SNIPPET_CHARS)
        ))
    })?;
    serde_json::from_str(raw).map_err(|e| {
        Error::AgentProtocol(format!(
            "{role} reply was not valid JSON ({e}): {}",
            snippet(reply, REPLY_SNIPPET_CHARS)
        ))
    })
}
