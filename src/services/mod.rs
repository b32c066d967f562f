//! Expiry action module
//!
//! This module contains the actions a host performs when the countdown
//! expires: notifying the user and navigating to the redirect target.

pub mod navigation;
pub mod notification;

// Re-export main functions
pub use navigation::*;
pub use notification::*;
