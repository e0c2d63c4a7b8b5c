//! Console rendering for banners and run outcomes.

use std::io::{self, Write};

use crate::core::domain::{FailureReport, InvocationOutcome, InvocationRequest, WorkspaceRoot};

const SEPARATOR_WIDTH: usize = 60;

const BANNER: &str = r#"
    ╔═══════════════════════════════════════════════════╗
    ║           AI Coding Agent - Ready!                ║
    ║     Transform ideas into code automatically       ║
    ╚═══════════════════════════════════════════════════╝
"#;

/// Writes progress to `out` and diagnostics to `err`.
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    pub fn banner(&mut self, root: &WorkspaceRoot) -> io::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        writeln!(self.out, "Output directory: {root}\n")
    }

    pub fn ask_for_prompt(&mut self) -> io::Result<()> {
        writeln!(self.out, "Enter your project description:")?;
        write!(self.out, "\n> ")?;
        self.out.flush()
    }

    pub fn starting(&mut self, request: &InvocationRequest) -> io::Result<()> {
        writeln!(self.out, "\nStarting agent workflow...")?;
        writeln!(self.out, "Request: {}", request.user_prompt())?;
        writeln!(self.out, "{}", separator())?;
        self.out.flush()
    }

    /// Plain error line for problems caught before the workflow runs.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "Error: {message}")
    }

    pub fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n\nOperation cancelled by user.")
    }

    pub fn outcome(&mut self, outcome: &InvocationOutcome, root: &WorkspaceRoot) -> io::Result<()> {
        match outcome {
            InvocationOutcome::Success(_) => self.completed(root),
            InvocationOutcome::Cancelled => self.cancelled(),
            InvocationOutcome::Failed(report) => self.failed(report),
        }
    }

    fn completed(&mut self, root: &WorkspaceRoot) -> io::Result<()> {
        writeln!(self.out, "\n{}", separator())?;
        writeln!(self.out, "Project generation complete!")?;
        writeln!(self.out, "Check your project at: {root}")?;
        writeln!(self.out, "{}", separator())
    }

    fn failed(&mut self, report: &FailureReport) -> io::Result<()> {
        writeln!(self.err, "\n{}", separator())?;
        writeln!(self.err, "ERROR OCCURRED")?;
        writeln!(self.err, "{}", separator())?;
        writeln!(self.err, "{}", report.diagnostic)?;
        writeln!(self.err, "\nError: {}", report.summary)?;
        writeln!(self.err, "\nTips:")?;
        for hint in &report.hints {
            writeln!(self.err, "  - {hint}")?;
        }
        self.err.flush()
    }
}

fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::WorkflowOutput;

    fn render(outcome: &InvocationOutcome) -> (String, String) {
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        reporter
            .outcome(outcome, &WorkspaceRoot::from_verified("/tmp/generated_project"))
            .unwrap();
        let (out, err) = reporter.into_writers();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn success_prints_completion_banner_only_to_stdout() {
        let (out, err) = render(&InvocationOutcome::Success(WorkflowOutput::default()));
        assert!(out.contains("Project generation complete!"));
        assert!(out.contains("Check your project at: /tmp/generated_project"));
        assert!(err.is_empty());
    }

    #[test]
    fn failure_prints_diagnostic_and_every_hint_to_stderr() {
        let error = anyhow::anyhow!("socket closed").context("Planner step failed");
        let (out, err) = render(&InvocationOutcome::Failed(FailureReport::from_error(&error)));
        assert!(out.is_empty());
        assert!(err.contains("ERROR OCCURRED"));
        assert!(err.contains("Caused by"));
        assert!(err.contains("socket closed"));
        assert!(err.contains("Error: Planner step failed"));
        assert!(err.contains("  - Make sure your .env file has GROQ_API_KEY set"));
        assert!(err.contains("  - Check if all dependencies are installed"));
        assert!(err.contains("  - Try reducing --recursion-limit if hitting limits"));
    }

    #[test]
    fn cancellation_is_a_neutral_notice() {
        let (out, err) = render(&InvocationOutcome::Cancelled);
        assert!(out.contains("Operation cancelled by user."));
        assert!(err.is_empty());
    }

    #[test]
    fn starting_echoes_the_request() {
        let mut reporter = Reporter::new(Vec::new(), Vec::new());
        let request = InvocationRequest::new("Build a todo app", 100).unwrap();
        reporter.starting(&request).unwrap();
        let (out, _) = reporter.into_writers();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Request: Build a todo app"));
        assert!(out.contains(&"=".repeat(60)));
    }
}
