//! User profile service module
//!
//! Profile reads go through the snapshot cache; mutations write the
//! primary store and keep the snapshot in step.

mod service;


pub use service::{UpdateProfileRequest, UserService};
