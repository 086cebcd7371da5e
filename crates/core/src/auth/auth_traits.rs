use async_trait::async_trait;

use super::auth_model::{NewVerificationCode, VerificationCode, VerificationPurpose};
use crate::errors::Result;
use crate::users::User;

/// Trait for verification-code repository operations
#[async_trait]
pub trait VerificationCodeRepositoryTrait: Send + Sync {
    fn find(&self, email: &str, purpose: VerificationPurpose)
        -> Result<Option<VerificationCode>>;
    /// Inserts the code, replacing any existing record for (email, purpose).
    async fn upsert(&self, new_code: NewVerificationCode) -> Result<VerificationCode>;
    async fn increment_attempts(&self, code_id: &str) -> Result<VerificationCode>;
    async fn delete(&self, code_id: &str) -> Result<usize>;
}

/// Password hashing seam; the server provides an Argon2 implementation.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait for the verification service operations
#[async_trait]
pub trait VerificationServiceTrait: Send + Sync {
    /// Starts a signup: stores the pending profile and emails a code.
    async fn request_signup(&self, email: &str, name: &str, password: &str) -> Result<()>;
    /// Starts a signin: checks credentials and emails a code.
    async fn request_signin(&self, email: &str, password: &str) -> Result<()>;
    /// Confirms a submitted code; returns the (possibly just created) user.
    async fn verify(&self, email: &str, code: &str, purpose: VerificationPurpose) -> Result<User>;
    /// Issues a fresh code for an in-flight verification.
    async fn resend(&self, email: &str, purpose: VerificationPurpose) -> Result<()>;
}
