//! Auth module - email verification codes and credential checks.

mod auth_model;
mod auth_traits;
mod verification_service;

#[cfg(test)]
mod verification_service_tests;

pub use auth_model::{
    hash_verification_code, NewVerificationCode, VerificationCode, VerificationPurpose,
};
pub use auth_traits::{PasswordHasher, VerificationCodeRepositoryTrait, VerificationServiceTrait};
pub use verification_service::VerificationService;
