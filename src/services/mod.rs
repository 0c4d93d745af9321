//! External collaborators module
//!
//! This module contains the notification sink that announces phase
//! transitions. Alert failures are always non-fatal.

pub mod alert;

// Re-export main functions
pub use alert::{alert_message, play_alert};
