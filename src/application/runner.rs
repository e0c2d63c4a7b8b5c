use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    core::{
        domain::{FailureReport, InvocationOutcome, InvocationRequest, InvokeOptions, WorkflowInput},
        ports::AgentWorkflow,
    },
    signals::{CancellationToken, with_cancellation},
};

/// Invokes the agent workflow once per request and classifies what happened.
pub struct WorkflowRunner {
    workflow: Arc<dyn AgentWorkflow>,
}

impl WorkflowRunner {
    pub fn new(workflow: Arc<dyn AgentWorkflow>) -> Self {
        Self { workflow }
    }

    /// Runs the workflow with the request's prompt and ceiling.
    ///
    /// Cancellation takes priority over any result the workflow might still
    /// produce; errors (including ceiling exhaustion) become `Failed` with
    /// the full cause chain.
    pub async fn run(
        &self,
        request: &InvocationRequest,
        cancel: &CancellationToken,
    ) -> InvocationOutcome {
        let input = WorkflowInput {
            user_prompt: request.user_prompt().to_string(),
        };
        let options = InvokeOptions {
            recursion_limit: request.recursion_limit(),
        };

        info!(
            recursion_limit = options.recursion_limit,
            prompt_chars = input.user_prompt.chars().count(),
            "Invoking agent workflow"
        );

        let outcome = match with_cancellation(cancel, self.workflow.invoke(&input, &options)).await
        {
            None => InvocationOutcome::Cancelled,
            Some(Ok(output)) => {
                let summary = serde_json::to_string(&output).unwrap_or_default();
                info!(
                    steps_taken = output.steps_taken,
                    output = %summary,
                    "Agent workflow produced output"
                );
                InvocationOutcome::Success(output)
            }
            Some(Err(err)) => {
                debug!(error = ?err, "Agent workflow raised an error");
                InvocationOutcome::Failed(FailureReport::from_error(&err))
            }
        };

        info!(outcome = outcome.as_str(), "Agent workflow finished");
        outcome
    }
}
