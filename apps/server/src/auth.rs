//! Session tokens, password hashing, and request auth extractors.

use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHasher as _};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::main_lib::AppState;
use teamline_core::auth::PasswordHasher;
use teamline_core::errors::{Error, Result};
use teamline_core::users::User;
use teamline_core::workspaces::{role_allows, Action, Resource, Role, WorkspaceMember};

/// Argon2 implementation of the core password-hashing seam.
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| Error::Unexpected(format!("Password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| Error::Unexpected(format!("Stored password hash is invalid: {e}")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Mints and validates the signed session tokens carried in the cookie.
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    pub cookie_name: String,
}

impl SessionManager {
    pub fn new(secret: &[u8], cookie_name: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
            cookie_name: cookie_name.to_string(),
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Unexpected(format!("Session token encoding failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Option<String> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| data.claims.sub)
    }

    /// Set-Cookie value establishing the session.
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name, self.ttl_secs
        )
    }

    /// Set-Cookie value clearing the session.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    let header = parts.headers.get(axum::http::header::COOKIE)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Extractor resolving the session cookie to a user. Rejects with 401.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = cookie_value(parts, &state.session.cookie_name)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;
        let user_id = state
            .session
            .verify(&token)
            .ok_or_else(|| ApiError::unauthorized("Session is invalid or expired"))?;
        let user = state
            .user_service
            .get_user(&user_id)
            .map_err(|_| ApiError::unauthorized("Session user no longer exists"))?;
        Ok(CurrentUser(user))
    }
}

/// Extractor resolving the session plus the workspace context: the
/// `x-workspace-id` header (with a cookie fallback) resolved to a
/// membership and role. Rejects with 401/404/403.
pub struct WorkspaceContext {
    pub user: User,
    pub member: WorkspaceMember,
}

impl WorkspaceContext {
    pub fn workspace_id(&self) -> &str {
        &self.member.workspace_id
    }

    pub fn role(&self) -> Role {
        self.member.role
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Checks the capability table; data-dependent refinements stay in the
    /// services.
    pub fn authorize(&self, resource: Resource, action: Action) -> std::result::Result<(), ApiError> {
        if role_allows(self.role(), resource, action) {
            Ok(())
        } else {
            Err(ApiError::forbidden("Insufficient role for this operation"))
        }
    }
}

impl FromRequestParts<Arc<AppState>> for WorkspaceContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        let workspace_id = parts
            .headers
            .get("x-workspace-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .or_else(|| cookie_value(parts, "workspaceId"))
            .ok_or_else(|| ApiError::bad_request("Missing x-workspace-id header"))?;

        let member = state
            .workspace_service
            .get_membership(&workspace_id, &user.id)
            .map_err(|_| ApiError::not_found("Workspace membership not found"))?;

        Ok(WorkspaceContext { user, member })
    }
}
