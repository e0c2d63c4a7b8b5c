use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, anyhow, ensure};
use serde::Deserialize;

use crate::cli::LlmProvider;

pub const DEFAULT_WORKSPACE_DIR: &str = "generated_project";

pub const DEFAULT_PLANNER_TEMPLATE: &str = r#"You are the PLANNER agent. Convert the user prompt into a COMPLETE engineering project plan.

User request:
{{user_prompt}}

Reply with a single JSON object and nothing else:
{"name": "...", "description": "...", "techstack": "...", "features": ["..."], "files": [{"path": "...", "purpose": "..."}]}"#;

pub const DEFAULT_ARCHITECT_TEMPLATE: &str = r#"You are the ARCHITECT agent. Given this project plan, break it down into explicit engineering tasks.

RULES:
- For each FILE in the plan, create one or more IMPLEMENTATION TASKS.
- In each task description, name exactly what to implement and mention how it integrates with other files.
- Order tasks so that dependencies are implemented first.

Project plan:
{{plan}}

Reply with a single JSON object and nothing else:
{"implementation_steps": [{"filepath": "...", "task_description": "..."}]}"#;

pub const DEFAULT_CODER_TEMPLATE: &str = r#"You are the CODER agent. You are implementing a specific engineering task.

Project plan:
{{plan}}

Task for `{{filepath}}`:
{{task_description}}

Existing content of `{{filepath}}`:
{{existing_content}}

Write the full, final content of every file you change. Wrap each file in
<file path="relative/path">...</file> and keep paths relative to the project root."#;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AutocoderConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl AutocoderConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let raw = fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file at {}", path_ref.display()))?;
        let mut config = Self::from_yaml_str(&raw)
            .with_context(|| format!("Invalid configuration in {}", path_ref.display()))?;
        let base_dir = path_ref.parent().unwrap_or_else(|| Path::new("."));
        config
            .agent
            .templates
            .hydrate(base_dir)
            .with_context(|| format!("Failed to hydrate templates for {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("Unable to parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise falls back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.workspace.validate()?;
        self.agent.validate()
    }
}

impl FromStr for AutocoderConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_yaml_str(s)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkspaceConfig {
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
        }
    }
}

impl WorkspaceConfig {
    fn validate(&self) -> Result<()> {
        ensure!(
            !self.dir_name.trim().is_empty(),
            "workspace.dir_name must not be blank"
        );
        Ok(())
    }
}

fn default_dir_name() -> String {
    DEFAULT_WORKSPACE_DIR.to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

impl AgentConfig {
    /// Model to use, falling back to the provider's default.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    fn validate(&self) -> Result<()> {
        if let Some(model) = &self.model {
            ensure!(!model.trim().is_empty(), "agent.model must not be blank");
        }
        if let Some(temp) = self.temperature {
            ensure!(
                (0.0..=2.0).contains(&temp),
                "agent.temperature must be between 0.0 and 2.0"
            );
        }
        self.templates.validate()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplatesConfig {
    #[serde(default = "default_planner")]
    pub planner: String,
    #[serde(default = "default_architect")]
    pub architect: String,
    #[serde(default = "default_coder")]
    pub coder: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            planner: default_planner(),
            architect: default_architect(),
            coder: default_coder(),
        }
    }
}

impl TemplatesConfig {
    fn hydrate(&mut self, base_dir: &Path) -> Result<()> {
        self.planner = resolve_prompt_template(&self.planner, base_dir)?;
        self.architect = resolve_prompt_template(&self.architect, base_dir)?;
        self.coder = resolve_prompt_template(&self.coder, base_dir)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (role, template) in [
            ("planner", &self.planner),
            ("architect", &self.architect),
            ("coder", &self.coder),
        ] {
            ensure!(
                !template.trim().is_empty(),
                "agent.templates.{role} must not be blank"
            );
        }
        Ok(())
    }
}

fn default_planner() -> String {
    DEFAULT_PLANNER_TEMPLATE.to_string()
}

fn default_architect() -> String {
    DEFAULT_ARCHITECT_TEMPLATE.to_string()
}

fn default_coder() -> String {
    DEFAULT_CODER_TEMPLATE.to_string()
}

fn resolve_prompt_template(raw: &str, base_dir: &Path) -> Result<String> {
    if raw.contains('\n') {
        return Ok(raw.to_string());
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let candidate = Path::new(trimmed);
    let joined: PathBuf = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    };

    if joined.is_file() {
        return fs::read_to_string(&joined)
            .with_context(|| format!("Failed to read prompt template {}", joined.display()));
    }

    if looks_like_template_path(trimmed) {
        return Err(anyhow!(
            "Prompt template '{}' was not found relative to {}",
            trimmed,
            base_dir.display()
        ));
    }

    Ok(raw.to_string())
}

fn looks_like_template_path(value: &str) -> bool {
    value.contains('/')
        || value.contains('\\')
        || value.ends_with(".hbs")
        || value.ends_with(".handlebars")
        || value.ends_with(".tmpl")
}
