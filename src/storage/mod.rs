//! Storage layer for revue.
//!
//! This module provides SQLite-based persistence for:
//! - The page tree and per-page review settings
//! - Users, groups, and group membership
//! - The site-wide review default
//! - The append-only review log
//! - The notification job queue

mod database;
mod members;
mod migrations;
mod pages;
mod reviews;

pub(crate) use database::OptionalExt;

pub use database::Database;
pub use members::MemberStore;
pub use pages::{NewPage, PageStore};
pub use reviews::ReviewLogStore;
