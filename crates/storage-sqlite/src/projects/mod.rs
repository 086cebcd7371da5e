mod model;
mod repository;

pub use model::{NewProjectDB, ProjectDB};
pub use repository::ProjectRepository;
