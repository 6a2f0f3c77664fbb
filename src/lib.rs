//! revue - a content review tracker for page-based CMS content
//!
//! This crate tracks which pages of a site are due for a content review.
//! Pages (or a site-wide default) carry review settings: an interval in days
//! and a set of content owners. revue resolves the settings inheritance
//! chain, computes due dates from the review log, and reports overdue pages.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod jobs;
pub mod model;
pub mod output;
pub mod report;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::RevueError;
pub use storage::Database;
