use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::auth::{
    NewVerificationCode, VerificationCode, VerificationCodeRepositoryTrait, VerificationPurpose,
};
use teamline_core::Result;

use super::model::{NewVerificationCodeDB, VerificationCodeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::verification_codes;

pub struct VerificationCodeRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl VerificationCodeRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        VerificationCodeRepository { pool, writer }
    }
}

#[async_trait]
impl VerificationCodeRepositoryTrait for VerificationCodeRepository {
    fn find(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> Result<Option<VerificationCode>> {
        let mut conn = get_connection(&self.pool)?;
        let code_db = verification_codes::table
            .filter(verification_codes::email.eq(email))
            .filter(verification_codes::purpose.eq(purpose.as_str()))
            .first::<VerificationCodeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(code_db.map(VerificationCode::from))
    }

    async fn upsert(&self, new_code: NewVerificationCode) -> Result<VerificationCode> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<VerificationCode> {
                    // Re-issuing replaces the previous record for this
                    // (email, purpose) and thereby resets the attempt counter.
                    diesel::delete(
                        verification_codes::table
                            .filter(verification_codes::email.eq(new_code.email.clone()))
                            .filter(
                                verification_codes::purpose.eq(new_code.purpose.as_str()),
                            ),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;

                    let now = Utc::now().naive_utc();
                    let new_code_db = NewVerificationCodeDB {
                        id: Uuid::new_v4().to_string(),
                        email: new_code.email,
                        purpose: new_code.purpose.as_str().to_string(),
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
                    let result_db = diesel::insert_into(verification_codes::table)
                        .values(&new_code_db)
                        .returning(VerificationCodeDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(VerificationCode::from(result_db))
                },
            )
            .await
    }

    async fn increment_attempts(&self, code_id: &str) -> Result<VerificationCode> {
        let code_id = code_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<VerificationCode> {
                    let result_db = diesel::update(verification_codes::table.find(code_id))
                        .set((
                            verification_codes::attempts
                                .eq(verification_codes::attempts + 1),
                            verification_codes::updated_at.eq(Utc::now().naive_utc()),
                        ))
                        .returning(VerificationCodeDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(VerificationCode::from(result_db))
                },
            )
            .await
    }

    async fn delete(&self, code_id: &str) -> Result<usize> {
        let code_id = code_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(verification_codes::table.find(code_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
