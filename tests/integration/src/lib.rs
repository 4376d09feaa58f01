//! Integration test utilities for stockbot
//!
//! This crate spawns the real HTTP application on a local port, backed by
//! the in-memory ports from `stockbot_service::testing`, and drives it over
//! HTTP with signed webhook deliveries.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
