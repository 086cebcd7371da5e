//! Export module - per-user workspace reports.

mod export_service;

pub use export_service::{ReportService, ReportServiceTrait, UserReport};
