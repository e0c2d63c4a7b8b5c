#![warn(clippy::uninlined_format_args)]

pub mod adapters;
pub mod agent;
pub mod application;
pub mod cli;
pub mod config;
pub mod core;
pub mod env;
pub mod paths;
pub mod signals;
pub mod tracing_setup;
pub mod utils;

pub use cli::Cli;
