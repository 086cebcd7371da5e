use chrono::{Duration, NaiveDateTime, Utc};
use log::{debug, warn};
use rand::Rng;
use std::sync::Arc;

use super::auth_model::{
    hash_verification_code, NewVerificationCode, VerificationCode, VerificationPurpose,
};
use super::auth_traits::{
    PasswordHasher, VerificationCodeRepositoryTrait, VerificationServiceTrait,
};
use crate::constants::{
    VERIFICATION_CODE_TTL_MINUTES, VERIFICATION_MAX_ATTEMPTS,
    VERIFICATION_RESEND_COOLDOWN_SECONDS,
};
use crate::errors::{AuthError, Error, Result, ValidationError};
use crate::mailer::Mailer;
use crate::users::{validate_email, NewUser, User, UserRepositoryTrait};

/// Service implementing the email-OTP signup/signin flows.
pub struct VerificationService {
    codes: Arc<dyn VerificationCodeRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
}

impl VerificationService {
    pub fn new(
        codes: Arc<dyn VerificationCodeRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            codes,
            users,
            hasher,
            mailer,
        }
    }

    fn generate_code() -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
    }

    /// The server is the source of truth for the resend cooldown; the
    /// client-side 60s countdown is cosmetic.
    fn check_cooldown(existing: Option<&VerificationCode>, now: NaiveDateTime) -> Result<()> {
        if let Some(code) = existing {
            let elapsed = (now - code.last_sent_at).num_seconds();
            if elapsed < VERIFICATION_RESEND_COOLDOWN_SECONDS {
                return Err(Error::Auth(AuthError::ResendThrottled {
                    retry_after_secs: VERIFICATION_RESEND_COOLDOWN_SECONDS - elapsed,
                }));
            }
        }
        Ok(())
    }

    async fn issue(
        &self,
        email: &str,
        purpose: VerificationPurpose,
        signup_name: Option<String>,
        signup_password_hash: Option<String>,
    ) -> Result<()> {
        let code = Self::generate_code();
        self.codes
            .upsert(NewVerificationCode {
                email: email.to_string(),
                purpose,
                code_hash: hash_verification_code(&code),
                max_attempts: VERIFICATION_MAX_ATTEMPTS,
                signup_name,
                signup_password_hash,
                expires_at: (Utc::now() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES))
                    .naive_utc(),
            })
            .await?;
        self.mailer
            .send_verification_code(email, &code, purpose)
            .await?;
        debug!("Issued {} verification code for {email}", purpose.as_str());
        Ok(())
    }
}

#[async_trait::async_trait]
impl VerificationServiceTrait for VerificationService {
    async fn request_signup(&self, email: &str, name: &str, password: &str) -> Result<()> {
        let email = validate_email(email)?;
        if name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if password.len() < 8 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            )));
        }
        if self.users.find_by_email(&email)?.is_some() {
            return Err(Error::Auth(AuthError::EmailAlreadyRegistered));
        }

        let existing = self.codes.find(&email, VerificationPurpose::Signup)?;
        Self::check_cooldown(existing.as_ref(), Utc::now().naive_utc())?;

        // Hash up front so the plaintext password never rests in storage.
        let password_hash = self.hasher.hash(password)?;
        self.issue(
            &email,
            VerificationPurpose::Signup,
            Some(name.trim().to_string()),
            Some(password_hash),
        )
        .await
    }

    async fn request_signin(&self, email: &str, password: &str) -> Result<()> {
        let email = validate_email(email)?;
        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(Error::Auth(AuthError::InvalidCredentials))?;
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(Error::Auth(AuthError::InvalidCredentials));
        }

        let existing = self.codes.find(&email, VerificationPurpose::Signin)?;
        Self::check_cooldown(existing.as_ref(), Utc::now().naive_utc())?;
        self.issue(&email, VerificationPurpose::Signin, None, None).await
    }

    async fn verify(&self, email: &str, code: &str, purpose: VerificationPurpose) -> Result<User> {
        let email = validate_email(email)?;
        let record = self
            .codes
            .find(&email, purpose)?
            .ok_or(Error::Auth(AuthError::InvalidVerificationCode))?;

        if record.expires_at < Utc::now().naive_utc() {
            self.codes.delete(&record.id).await?;
            return Err(Error::Auth(AuthError::VerificationCodeExpired));
        }

        if record.code_hash != hash_verification_code(code) {
            let updated = self.codes.increment_attempts(&record.id).await?;
            if updated.attempts >= updated.max_attempts {
                // Cap exceeded: the code is gone; even the right code fails now.
                self.codes.delete(&record.id).await?;
                return Err(Error::Auth(AuthError::TooManyAttempts));
            }
            return Err(Error::Auth(AuthError::InvalidVerificationCode));
        }

        let user = match purpose {
            VerificationPurpose::Signup => {
                if self.users.find_by_email(&email)?.is_some() {
                    self.codes.delete(&record.id).await?;
                    return Err(Error::Auth(AuthError::EmailAlreadyRegistered));
                }
                let name = record.signup_name.clone().ok_or_else(|| {
                    Error::Unexpected("Signup verification lost its profile data".to_string())
                })?;
                let password_hash = record.signup_password_hash.clone().ok_or_else(|| {
                    Error::Unexpected("Signup verification lost its password hash".to_string())
                })?;
                let user = self
                    .users
                    .insert(NewUser {
                        email: email.clone(),
                        name: name.clone(),
                        password_hash,
                    })
                    .await?;
                if let Err(e) = self.mailer.send_welcome(&email, &name).await {
                    warn!("Welcome mail for {email} failed: {e}");
                }
                user
            }
            VerificationPurpose::Signin => {
                let user = self
                    .users
                    .find_by_email(&email)?
                    .ok_or(Error::Auth(AuthError::InvalidCredentials))?;
                self.users.touch_last_login(&user.id).await?
            }
        };

        self.codes.delete(&record.id).await?;
        Ok(user)
    }

    async fn resend(&self, email: &str, purpose: VerificationPurpose) -> Result<()> {
        let email = validate_email(email)?;
        let record = self
            .codes
            .find(&email, purpose)?
            .ok_or_else(|| Error::NotFound("Verification request".to_string()))?;
        Self::check_cooldown(Some(&record), Utc::now().naive_utc())?;

        // A fresh code replaces the old record and resets the attempt counter,
        // carrying the signup payload forward.
        let code = Self::generate_code();
        self.codes
            .upsert(NewVerificationCode {
                email: email.clone(),
                purpose,
                code_hash: hash_verification_code(&code),
                max_attempts: record.max_attempts,
                signup_name: record.signup_name,
                signup_password_hash: record.signup_password_hash,
                expires_at: (Utc::now() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES))
                    .naive_utc(),
            })
            .await?;
        self.mailer
            .send_verification_code(&email, &code, purpose)
            .await?;
        Ok(())
    }
}
