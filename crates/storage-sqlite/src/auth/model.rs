//! Database models for verification codes.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::auth::{VerificationCode, VerificationPurpose};

/// Database model for verification codes
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::verification_codes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct VerificationCodeDB {
    pub id: String,
    pub email: String,
    pub purpose: String,
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

/// Database model for storing a freshly issued code
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::verification_codes)]
#[serde(rename_all = "camelCase")]
pub struct NewVerificationCodeDB {
    pub id: String,
    pub email: String,
    pub purpose: String,
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

impl From<VerificationCodeDB> for VerificationCode {
    fn from(db: VerificationCodeDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            purpose: VerificationPurpose::parse(&db.purpose)
                .unwrap_or(VerificationPurpose::Signin),
            code_hash: db.code_hash,
            attempts: db.attempts,
            max_attempts: db.max_attempts,
            signup_name: db.signup_name,
            signup_password_hash: db.signup_password_hash,
            expires_at: db.expires_at,
            last_sent_at: db.last_sent_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
