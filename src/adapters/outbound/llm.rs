use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rig::{
    client::CompletionClient,
    completion::Prompt,
    providers::{anthropic, groq, openai},
};

use crate::cli::LlmProvider;
use crate::core::error::Error as CoreError;
use crate::core::ports::{LlmClient, LlmOptions};

/// Concrete [`LlmClient`] backed by `rig` providers.
#[derive(Clone)]
pub struct RigLlmClient {
    inner: Arc<RigLlmClientInner>,
}

struct RigLlmClientInner {
    provider: LlmProvider,
    api_key: String,
    http_client: reqwest::Client,
}

impl RigLlmClient {
    pub fn new(provider: LlmProvider, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(anyhow!("API key may not be empty"));
        }

        let http_client = build_http_client()?;
        Ok(Self {
            inner: Arc::new(RigLlmClientInner {
                provider,
                api_key,
                http_client,
            }),
        })
    }

    /// Builds a client for `provider`, reading the key from its environment
    /// variable.
    pub fn from_env(provider: LlmProvider) -> Result<Self> {
        let env_var = provider.env_var();
        let key = std::env::var(env_var)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing API key: set {env_var} in the environment or .env"))?;
        Self::new(provider, key.trim())
    }
}

impl std::fmt::Debug for RigLlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RigLlmClient")
            .field("provider", &self.inner.provider)
            .finish()
    }
}

#[async_trait]
impl LlmClient for RigLlmClient {
    async fn chat_completion(
        &self,
        model: &str,
        prompt: &str,
        options: &LlmOptions,
    ) -> crate::core::Result<String> {
        self.prompt_once(model, prompt, options.temperature.map(f64::from))
            .await
            .map_err(|err| CoreError::LlmProvider {
                provider: self.inner.provider.as_str().to_string(),
                details: err.to_string(),
            })
    }
}

impl RigLlmClient {
    async fn prompt_once(
        &self,
        model: &str,
        prompt: &str,
        temperature: Option<f64>,
    ) -> Result<String> {
        match self.inner.provider {
            LlmProvider::Groq => {
                let client: groq::Client<reqwest::Client> =
                    groq::Client::<reqwest::Client>::builder()
                        .api_key(&self.inner.api_key)
                        .http_client(self.inner.http_client.clone())
                        .build()
                        .map_err(|err| anyhow!("Failed to create Groq client: {err}"))?;

                let mut agent_builder = client.agent(model);
                if let Some(temp) = temperature {
                    agent_builder = agent_builder.temperature(temp);
                }
                agent_builder
                    .build()
                    .prompt(prompt)
                    .await
                    .map_err(|err| anyhow!("Groq prompt error: {err}"))
            }
            LlmProvider::Openai => {
                let client: openai::Client<reqwest::Client> =
                    openai::Client::<reqwest::Client>::builder()
                        .api_key(&self.inner.api_key)
                        .http_client(self.inner.http_client.clone())
                        .build()
                        .map_err(|err| anyhow!("Failed to create OpenAI client: {err}"))?;

                let mut agent_builder = client.agent(model);
                if let Some(temp) = temperature {
                    agent_builder = agent_builder.temperature(temp);
                }
                agent_builder
                    .build()
                    .prompt(prompt)
                    .await
                    .map_err(|err| anyhow!("OpenAI prompt error: {err}"))
            }
            LlmProvider::Anthropic => {
                let client: anthropic::Client<reqwest::Client> =
                    anthropic::Client::<reqwest::Client>::builder()
                        .api_key(&self.inner.api_key)
                        .http_client(self.inner.http_client.clone())
                        .build()
                        .map_err(|err| anyhow!("Failed to create Anthropic client: {err}"))?;

                let mut agent_builder = client.agent(model);
                if let Some(temp) = temperature {
                    agent_builder = agent_builder.temperature(temp);
                }
                agent_builder
                    .build()
                    .prompt(prompt)
                    .await
                    .map_err(|err| anyhow!("Anthropic prompt error: {err}"))
            }
        }
    }
}

fn build_http_client() -> Result<reqwest::Client> {
    // OS-level proxy discovery can panic in sandboxed environments on macOS.
    // Opt back in with `AUTOCODER_ENABLE_SYSTEM_PROXY=1`.
    let mut builder = reqwest::Client::builder();
    if std::env::var_os("AUTOCODER_ENABLE_SYSTEM_PROXY").is_none() {
        builder = builder.no_proxy();
    }
    builder
        .build()
        .map_err(|err| anyhow!("Failed to build HTTP client: {err}"))
}
