//! Route handlers

pub mod counter;
pub mod health;
pub mod receiver;
pub mod webhook;
