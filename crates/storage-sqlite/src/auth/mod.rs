mod model;
mod repository;

pub use model::{NewVerificationCodeDB, VerificationCodeDB};
pub use repository::VerificationCodeRepository;
