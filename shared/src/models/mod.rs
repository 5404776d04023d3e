//! Data models
//!
//! Mirrors the JSON documents exchanged with the valet API (`/api/v1`).
//! Field names follow the server's camelCase convention.

pub mod auth;
pub mod valet_event;

// Re-exports
pub use auth::*;
pub use valet_event::*;
