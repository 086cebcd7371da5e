//! Outbound mail seam.
//!
//! Delivery through a managed email provider is deployment glue; core only
//! depends on this trait. The server injects [`LogMailer`] by default, which
//! writes the mail to the process log.

use async_trait::async_trait;
use log::info;

use crate::auth::VerificationPurpose;
use crate::errors::Result;

/// Trait for sending the few transactional mails the system produces.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<()>;

    async fn send_welcome(&self, email: &str, name: &str) -> Result<()>;
}

/// Mailer that logs instead of delivering.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> Result<()> {
        info!("[mail] verification code {code} ({}) for {email}", purpose.as_str());
        Ok(())
    }

    async fn send_welcome(&self, email: &str, name: &str) -> Result<()> {
        info!("[mail] welcome {name} <{email}>");
        Ok(())
    }
}
