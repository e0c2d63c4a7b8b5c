//! Inbound adapters translate external stimuli into application commands.

pub mod cli;
