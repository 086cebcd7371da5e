/// Length of email verification codes
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Verification codes expire this many minutes after issuance
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 10;

/// Wrong submissions allowed before a verification code is invalidated
pub const VERIFICATION_MAX_ATTEMPTS: i32 = 5;

/// Cooldown between verification-code sends for the same email
pub const VERIFICATION_RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Workspace invitations expire this many days after issuance
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Maximum accepted document upload size
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;
