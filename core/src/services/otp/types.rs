//! Result types for one-time password operations

use crate::domain::entities::OtpCode;

/// Outcome of a successful code send
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    /// The code that was generated and queued for delivery
    pub code: OtpCode,
    /// How many sends this address has used within the current window
    pub attempts: i64,
}
