//! Verification-code domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{Error, Result, ValidationError};

/// What a verification code unlocks once submitted correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationPurpose {
    Signup,
    Signin,
}

impl VerificationPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Signup => "signup",
            VerificationPurpose::Signin => "signin",
        }
    }

    pub fn parse(s: &str) -> Result<VerificationPurpose> {
        match s {
            "signup" => Ok(VerificationPurpose::Signup),
            "signin" => Ok(VerificationPurpose::Signin),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown verification type '{other}'"
            )))),
        }
    }
}

/// SHA-256 hex digest of a verification code; codes are never stored in
/// plaintext.
pub fn hash_verification_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// A pending email verification.
///
/// For signup flows the record also carries the profile data (name, password
/// hash) needed to create the user once the code is confirmed; the user row
/// itself does not exist until then.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCode {
    pub id: String,
    pub email: String,
    pub purpose: VerificationPurpose,
    pub code_hash: String,
    pub attempts: i32,
    pub max_attempts: i32,
    pub signup_name: Option<String>,
    pub signup_password_hash: Option<String>,
    pub expires_at: NaiveDateTime,
    pub last_sent_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for storing a freshly issued code. Upserted by (email,
/// purpose): re-issuing replaces the previous record and resets attempts.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewVerificationCode {
    pub email: String,
    pub purpose: VerificationPurpose,
    pub code_hash: String,
    pub max_attempts: i32,
    pub signup_name: Option<String>,
    pub signup_password_hash: Option<String>,
    pub expires_at: NaiveDateTime,
}
