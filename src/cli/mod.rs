//! Command-line interface for revue.

pub mod args;
pub mod commands;
