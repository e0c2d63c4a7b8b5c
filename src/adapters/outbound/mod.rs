pub mod filesystem;
pub mod llm;
pub mod templating;
