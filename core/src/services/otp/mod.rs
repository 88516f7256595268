//! One-time password service module for email verification
//!
//! This module provides the OTP workflow:
//! - Code generation and delivery through the mail queue
//! - Resend gating while a code is outstanding
//! - Send-attempt tracking per address
//! - Constant-time verification

mod config;
mod service;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use types::SendOtpResult;
