//! Teamline server library: router construction and state wiring, exposed
//! for the binary and for integration tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use main_lib::{build_state, init_tracing, AppState};
