//! HTTP handlers for commander-service.

pub mod bots;
pub mod code;
pub mod health;
pub mod info;
pub mod tasks;
