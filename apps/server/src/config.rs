//! Server configuration, read once from the environment at startup.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// SQLite database file path.
    pub db_path: String,
    /// Root directory for uploaded documents (one subdirectory per workspace).
    pub uploads_root: String,
    /// Directory with the built frontend, served as a fallback.
    pub static_dir: String,
    /// Secret used to sign session tokens.
    pub session_secret: Vec<u8>,
    /// Name of the session cookie.
    pub session_cookie: String,
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; real deployments set the environment directly.
        let _ = dotenvy::dotenv();

        let session_secret = match std::env::var("TL_SESSION_SECRET") {
            Ok(value) => BASE64
                .decode(value.trim())
                .unwrap_or_else(|_| value.trim().as_bytes().to_vec()),
            Err(_) => {
                // Sessions will not survive a restart without a configured
                // secret; fine for development, wrong for production.
                tracing::warn!("TL_SESSION_SECRET not set, generating an ephemeral secret");
                let mut bytes = [0u8; 32];
                rand::rngs::OsRng.fill_bytes(&mut bytes);
                bytes.to_vec()
            }
        };

        Config {
            listen_addr: std::env::var("TL_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: std::env::var("TL_DB_PATH")
                .unwrap_or_else(|_| "data/teamline.db".to_string()),
            uploads_root: std::env::var("TL_UPLOADS_ROOT")
                .unwrap_or_else(|_| "public/uploads".to_string()),
            static_dir: std::env::var("TL_STATIC_DIR").unwrap_or_else(|_| "dist".to_string()),
            session_secret,
            session_cookie: std::env::var("TL_SESSION_COOKIE")
                .unwrap_or_else(|_| "tl_session".to_string()),
            session_ttl_secs: std::env::var("TL_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7 * 24 * 60 * 60),
        }
    }
}
