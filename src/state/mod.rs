//! State management module
//!
//! This module contains the countdown state and the terminal events it ends with.

pub mod ticker_state;

// Re-export main types
pub use ticker_state::{ExpiryEvent, TickerOutcome, TickerState};
