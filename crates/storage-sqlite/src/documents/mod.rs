mod model;
mod repository;

pub use model::{DocumentDB, NewDocumentDB};
pub use repository::DocumentRepository;
