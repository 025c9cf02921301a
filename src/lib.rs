// Clippy allows for reasonable defaults
#![allow(clippy::too_many_arguments)] // Pipeline entry points take each provider seam separately
#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types

// Module declarations
pub mod artifacts;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod templates;

// Server module (HTTP API)
pub mod server;

// Re-export models for use at the crate root
pub use models::*;
