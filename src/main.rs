use std::{
    io,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use uuid::Uuid;

use autocoder::{
    adapters::{
        inbound::cli::{CliAdapter, Reporter, StdinPromptReader, WorkflowFactory},
        outbound::{filesystem::StdFileSystem, llm::RigLlmClient, templating::HandlebarsRenderer},
    },
    agent::{CodingAgent, LlmClientFactory},
    application::WorkspaceInitializer,
    cli::Cli,
    config::AutocoderConfig,
    core::{
        domain::WorkspaceRoot,
        ports::{AgentWorkflow, FileSystem, LlmClient},
    },
    env::ensure_env_files_loaded,
    signals::{CancellationToken, spawn_interrupt_listener},
    tracing_setup,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Before tracing so `.env` can set RUST_LOG.
    ensure_env_files_loaded();
    let run_id = Uuid::new_v4().to_string();
    let _log_guard = tracing_setup::init(cli.verbose, cli.log_json, &run_id);
    tracing::debug!(%run_id, "Starting autocoder");

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(error = ?err, "Command failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let mut config = AutocoderConfig::load(cli.config.as_deref())?;
    if let Some(provider) = cli.llm_provider {
        config.agent.provider = provider;
    }
    if let Some(model) = cli.llm_model.clone() {
        config.agent.model = Some(model);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let code = runtime.block_on(async {
        let cancel = CancellationToken::new();
        spawn_interrupt_listener(cancel.clone());

        let mut adapter = build_adapter(&config, cli.output_dir.clone());
        adapter
            .execute(cli.prompt.clone(), cli.recursion_limit, &cancel)
            .await
    });

    // A cancelled interactive read leaves a blocking stdin thread behind.
    runtime.shutdown_timeout(Duration::from_millis(100));
    code
}

fn build_adapter(
    config: &AutocoderConfig,
    output_dir: Option<PathBuf>,
) -> CliAdapter<io::Stdout, io::Stderr> {
    let file_system: Arc<dyn FileSystem> = Arc::new(StdFileSystem::new());
    let target = output_dir.unwrap_or_else(|| PathBuf::from(&config.workspace.dir_name));
    let initializer = WorkspaceInitializer::new(file_system.clone(), target);

    let agent_config = config.agent.clone();
    let factory: WorkflowFactory = Arc::new(move |root: &WorkspaceRoot| {
        let provider = agent_config.provider;
        let llm_factory: LlmClientFactory = Arc::new(move || -> Result<Arc<dyn LlmClient>> {
            let client = RigLlmClient::from_env(provider)?;
            Ok(Arc::new(client) as Arc<dyn LlmClient>)
        });
        Arc::new(CodingAgent::new(
            agent_config.clone(),
            root.clone(),
            llm_factory,
            Arc::new(HandlebarsRenderer::new()),
            file_system.clone(),
        )) as Arc<dyn AgentWorkflow>
    });

    CliAdapter::new(
        initializer,
        factory,
        Arc::new(StdinPromptReader),
        Reporter::new(io::stdout(), io::stderr()),
    )
}
