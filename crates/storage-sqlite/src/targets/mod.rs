mod model;
mod repository;

pub use model::{NewTargetDB, TargetDB};
pub use repository::TargetRepository;
