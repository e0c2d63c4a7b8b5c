//! Use-case layer: workspace setup and bounded workflow invocation.

pub mod runner;
pub mod workspace;

pub use runner::WorkflowRunner;
pub use workspace::WorkspaceInitializer;
