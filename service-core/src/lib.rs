//! service-core: Shared infrastructure for commander services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod utils;
