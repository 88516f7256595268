//! Mail dispatch capability trait and message templates
//!
//! Delivery happens out of process; the service layer only enqueues
//! [`MailMessage`] jobs through [`MailDispatcher`]. The production
//! dispatcher lives in the infrastructure crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::otp::DEFAULT_EXPIRATION_MINUTES;
use crate::errors::DomainResult;

/// An email ready to be handed to the delivery worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Plain-text body
    pub text: String,

    /// HTML body
    pub html: String,
}

/// Trait for mail queue integration
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Enqueue a message for asynchronous delivery
    async fn enqueue(&self, mail: MailMessage) -> DomainResult<()>;
}

/// Builds the one-time password email for `email` carrying `code`
pub fn otp_email(email: &str, code: &str) -> MailMessage {
    let html = format!(
        r#"
      <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e1e1e1; border-radius: 5px;">
        <h2 style="color: #333;">Your One-Time Password</h2>
        <p>Use the following code to complete your authentication:</p>
        <div style="background-color: #f5f5f5; padding: 15px; text-align: center; border-radius: 4px; margin: 20px 0;">
          <h1 style="letter-spacing: 5px; color: #333; margin: 0;">{code}</h1>
        </div>
        <p>This code will expire in {DEFAULT_EXPIRATION_MINUTES} minutes.</p>
        <p>If you didn't request this code, you can safely ignore this email.</p>
      </div>
    "#
    );

    MailMessage {
        to: email.to_string(),
        subject: "One-Time Password".to_string(),
        text: format!("Your One-Time Password: {code}"),
        html,
    }
}
