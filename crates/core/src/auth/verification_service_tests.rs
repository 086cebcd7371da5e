//! Tests for the email-OTP verification flows, using in-memory fakes for
//! the repository, user store, hasher, and mailer.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::auth_model::{NewVerificationCode, VerificationCode, VerificationPurpose};
use super::auth_traits::{
    PasswordHasher, VerificationCodeRepositoryTrait, VerificationServiceTrait,
};
use super::verification_service::VerificationService;
use crate::errors::{AuthError, Error, Result};
use crate::mailer::Mailer;
use crate::users::{NewUser, User, UserRepositoryTrait};

#[derive(Default)]
struct FakeCodeRepo {
    codes: Mutex<Vec<VerificationCode>>,
}

#[async_trait]
impl VerificationCodeRepositoryTrait for FakeCodeRepo {
    fn find(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> Result<Option<VerificationCode>> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email && c.purpose == purpose)
            .cloned())
    }

    async fn upsert(&self, new_code: NewVerificationCode) -> Result<VerificationCode> {
        let mut codes = self.codes.lock().unwrap();
        codes.retain(|c| !(c.email == new_code.email && c.purpose == new_code.purpose));
        let now = Utc::now().naive_utc();
        let code = VerificationCode {
            id: Uuid::new_v4().to_string(),
            email: new_code.email,
            purpose: new_code.purpose,
            code_hash: new_code.code_hash,
            attempts: 0,
            max_attempts: new_code.max_attempts,
            signup_name: new_code.signup_name,
            signup_password_hash: new_code.signup_password_hash,
            expires_at: new_code.expires_at,
            last_sent_at: now,
            created_at: now,
            updated_at: now,
        };
        codes.push(code.clone());
        Ok(code)
    }

    async fn increment_attempts(&self, code_id: &str) -> Result<VerificationCode> {
        let mut codes = self.codes.lock().unwrap();
        let code = codes
            .iter_mut()
            .find(|c| c.id == code_id)
            .ok_or_else(|| Error::NotFound("Verification code".to_string()))?;
        code.attempts += 1;
        Ok(code.clone())
    }

    async fn delete(&self, code_id: &str) -> Result<usize> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.id != code_id);
        Ok(before - codes.len())
    }
}

impl FakeCodeRepo {
    fn age_last_sent(&self, email: &str, secs: i64) {
        for c in self.codes.lock().unwrap().iter_mut() {
            if c.email == email {
                c.last_sent_at -= Duration::seconds(secs);
            }
        }
    }

    fn expire(&self, email: &str) {
        for c in self.codes.lock().unwrap().iter_mut() {
            if c.email == email {
                c.expires_at = Utc::now().naive_utc() - Duration::seconds(1);
            }
        }
    }
}

#[derive(Default)]
struct FakeUserRepo {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepositoryTrait for FakeUserRepo {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let now = Utc::now().naive_utc();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            is_verified: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn touch_last_login(&self, user_id: &str) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::NotFound("User".to_string()))?;
        user.last_login_at = Some(Utc::now().naive_utc());
        Ok(user.clone())
    }
}

struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        Ok(password_hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
struct CapturingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl CapturingMailer {
    fn last_code(&self, email: &str) -> String {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
            .expect("no code sent")
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _purpose: VerificationPurpose,
    ) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_welcome(&self, _email: &str, _name: &str) -> Result<()> {
        Ok(())
    }
}

struct Harness {
    codes: Arc<FakeCodeRepo>,
    users: Arc<FakeUserRepo>,
    mailer: Arc<CapturingMailer>,
    service: VerificationService,
}

fn harness() -> Harness {
    let codes = Arc::new(FakeCodeRepo::default());
    let users = Arc::new(FakeUserRepo::default());
    let mailer = Arc::new(CapturingMailer::default());
    let service = VerificationService::new(
        codes.clone(),
        users.clone(),
        Arc::new(PlainHasher),
        mailer.clone(),
    );
    Harness {
        codes,
        users,
        mailer,
        service,
    }
}

#[tokio::test]
async fn signup_verify_creates_user_and_deletes_code() {
    let h = harness();
    h.service
        .request_signup("alice@example.com", "Alice", "password123")
        .await
        .unwrap();
    let code = h.mailer.last_code("alice@example.com");

    let user = h
        .service
        .verify("alice@example.com", &code, VerificationPurpose::Signup)
        .await
        .unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.password_hash, "hashed:password123");

    // Record is gone, replay fails
    let replay = h
        .service
        .verify("alice@example.com", &code, VerificationPurpose::Signup)
        .await;
    assert!(matches!(
        replay,
        Err(Error::Auth(AuthError::InvalidVerificationCode))
    ));
}

#[tokio::test]
async fn wrong_code_increments_attempts() {
    let h = harness();
    h.service
        .request_signup("bob@example.com", "Bob", "password123")
        .await
        .unwrap();

    let err = h
        .service
        .verify("bob@example.com", "000000", VerificationPurpose::Signup)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidVerificationCode)));
    assert_eq!(err.to_string(), "Authentication failed: Invalid verification code");

    let stored = h
        .codes
        .find("bob@example.com", VerificationPurpose::Signup)
        .unwrap()
        .unwrap();
    assert_eq!(stored.attempts, 1);
}

#[tokio::test]
async fn attempt_cap_deletes_code_and_blocks_correct_submission() {
    let h = harness();
    h.service
        .request_signup("carol@example.com", "Carol", "password123")
        .await
        .unwrap();
    let real_code = h.mailer.last_code("carol@example.com");
    let wrong = if real_code == "111111" { "222222" } else { "111111" };

    for i in 1..=5 {
        let err = h
            .service
            .verify("carol@example.com", wrong, VerificationPurpose::Signup)
            .await
            .unwrap_err();
        if i < 5 {
            assert!(matches!(err, Error::Auth(AuthError::InvalidVerificationCode)));
        } else {
            assert!(matches!(err, Error::Auth(AuthError::TooManyAttempts)));
        }
    }

    // The correct code no longer works: the record was deleted at the cap.
    let err = h
        .service
        .verify("carol@example.com", &real_code, VerificationPurpose::Signup)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidVerificationCode)));
    assert!(h.users.find_by_email("carol@example.com").unwrap().is_none());
}

#[tokio::test]
async fn expired_code_is_rejected_and_removed() {
    let h = harness();
    h.service
        .request_signup("dave@example.com", "Dave", "password123")
        .await
        .unwrap();
    let code = h.mailer.last_code("dave@example.com");
    h.codes.expire("dave@example.com");

    let err = h
        .service
        .verify("dave@example.com", &code, VerificationPurpose::Signup)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::VerificationCodeExpired)));
    assert!(h
        .codes
        .find("dave@example.com", VerificationPurpose::Signup)
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn resend_is_throttled_then_resets_attempts() {
    let h = harness();
    h.service
        .request_signup("erin@example.com", "Erin", "password123")
        .await
        .unwrap();

    let err = h
        .service
        .resend("erin@example.com", VerificationPurpose::Signup)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Auth(AuthError::ResendThrottled { .. })
    ));

    // Burn an attempt, age past the cooldown, resend: fresh code, fresh counter.
    let _ = h
        .service
        .verify("erin@example.com", "000000", VerificationPurpose::Signup)
        .await;
    h.codes.age_last_sent("erin@example.com", 61);
    h.service
        .resend("erin@example.com", VerificationPurpose::Signup)
        .await
        .unwrap();

    let stored = h
        .codes
        .find("erin@example.com", VerificationPurpose::Signup)
        .unwrap()
        .unwrap();
    assert_eq!(stored.attempts, 0);
    assert_eq!(stored.signup_name.as_deref(), Some("Erin"));

    let code = h.mailer.last_code("erin@example.com");
    let user = h
        .service
        .verify("erin@example.com", &code, VerificationPurpose::Signup)
        .await
        .unwrap();
    assert_eq!(user.name, "Erin");
}

#[tokio::test]
async fn signin_requires_valid_credentials() {
    let h = harness();
    h.service
        .request_signup("frank@example.com", "Frank", "password123")
        .await
        .unwrap();
    let code = h.mailer.last_code("frank@example.com");
    h.service
        .verify("frank@example.com", &code, VerificationPurpose::Signup)
        .await
        .unwrap();

    let err = h
        .service
        .request_signin("frank@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));

    h.service
        .request_signin("frank@example.com", "password123")
        .await
        .unwrap();
    let code = h.mailer.last_code("frank@example.com");
    let user = h
        .service
        .verify("frank@example.com", &code, VerificationPurpose::Signin)
        .await
        .unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let h = harness();
    h.service
        .request_signup("gina@example.com", "Gina", "password123")
        .await
        .unwrap();
    let code = h.mailer.last_code("gina@example.com");
    h.service
        .verify("gina@example.com", &code, VerificationPurpose::Signup)
        .await
        .unwrap();

    let err = h
        .service
        .request_signup("gina@example.com", "Gina", "password123")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::EmailAlreadyRegistered)));
}
