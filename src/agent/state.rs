use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Project plan produced by the planner node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub description: String,
    pub techstack: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub files: Vec<PlannedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFile {
    pub path: String,
    pub purpose: String,
}

/// Architect output: ordered work for the coder node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub implementation_steps: Vec<ImplementationTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationTask {
    pub filepath: String,
    pub task_description: String,
}

/// Nodes of the planner → architect → coder graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Planner,
    Architect,
    Coder,
    End,
}

impl Node {
    pub fn as_str(self) -> &'static str {
        match self {
            Node::Planner => "planner",
            Node::Architect => "architect",
            Node::Coder => "coder",
            Node::End => "end",
        }
    }
}

/// Mutable state threaded through one graph run.
#[derive(Debug, Default)]
pub struct AgentState {
    pub user_prompt: String,
    pub plan: Option<Plan>,
    pub tasks: Vec<ImplementationTask>,
    pub next_task: usize,
    pub files_written: Vec<PathBuf>,
}

impl AgentState {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            ..Self::default()
        }
    }

    pub fn current_task(&self) -> Option<&ImplementationTask> {
        self.tasks.get(self.next_task)
    }

    pub fn record_written(&mut self, path: PathBuf) {
        if !self.files_written.contains(&path) {
            self.files_written.push(path);
        }
    }
}

/// Counts node executions against the caller's ceiling.
#[derive(Debug, Clone, Copy)]
pub struct StepBudget {
    limit: u32,
    taken: u32,
}

impl StepBudget {
    pub fn new(limit: u32) -> Self {
        Self { limit, taken: 0 }
    }

    /// Claims one step, failing once the ceiling has been reached.
    pub fn consume(&mut self) -> crate::core::Result<u32> {
        if self.taken >= self.limit {
            return Err(crate::core::Error::RecursionLimit { limit: self.limit });
        }
        self.taken += 1;
        Ok(self.taken)
    }

    pub fn taken(&self) -> u32 {
        self.taken
    }
}
