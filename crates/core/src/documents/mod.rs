//! Documents module - uploaded files stored on the local filesystem.

mod documents_model;
mod documents_service;
mod documents_traits;

#[cfg(test)]
mod documents_service_tests;

pub use documents_model::{sanitize_file_name, Document, NewDocument};
pub use documents_service::DocumentService;
pub use documents_traits::{DocumentRepositoryTrait, DocumentServiceTrait};
