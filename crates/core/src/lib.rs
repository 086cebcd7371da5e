//! Teamline Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Teamline.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod attendance;
pub mod auth;
pub mod constants;
pub mod documents;
pub mod errors;
pub mod export;
pub mod mailer;
pub mod notifications;
pub mod projects;
pub mod targets;
pub mod tasks;
pub mod teams;
pub mod users;
pub mod workspaces;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export the role/policy types used across every service boundary
pub use workspaces::{Action, Resource, Role};
