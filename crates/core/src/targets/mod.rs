//! Targets module - measurable goals with lazily derived status.

mod targets_model;
mod targets_resolver;
mod targets_service;
mod targets_traits;

#[cfg(test)]
mod targets_service_tests;

pub use targets_model::{NewTarget, Target, TargetStatus, TargetUpdate};
pub use targets_resolver::{resolve_status, StatusResolution};
pub use targets_service::TargetService;
pub use targets_traits::{TargetRepositoryTrait, TargetServiceTrait};
