//! SQLite storage implementation for Teamline.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `teamline-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. The core crate is database-agnostic and works with traits; the
//! server wires these repositories into core services.
//!
//! Reads go straight to the r2d2 pool. Writes are serialized through a
//! single writer actor that owns one connection and wraps every job in an
//! immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod attendance;
pub mod auth;
pub mod documents;
pub mod notifications;
pub mod projects;
pub mod targets;
pub mod tasks;
pub mod teams;
pub mod users;
pub mod workspaces;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from teamline-core for convenience
pub use teamline_core::errors::{DatabaseError, Error, Result};
