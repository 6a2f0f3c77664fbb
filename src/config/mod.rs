//! Configuration management for revue.
//!
//! This module handles loading and saving configuration from `~/.revue/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, JobConfig, ReportConfig};
