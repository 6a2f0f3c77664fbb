//! Core review logic for revue.
//!
//! Settings-inheritance resolution, due-date calculation, owner merging, and
//! authorization. Everything here is pure logic over the storage layer.

pub mod auth;
pub mod duedate;
pub mod owners;
pub mod resolver;
pub mod schedule;

pub use auth::{Authorizer, StoreAuthorizer};
pub use resolver::EffectiveSettings;
