//! Background tasks module
//!
//! This module contains the countdown ticker and the handle used to observe
//! and stop it.

pub mod countdown_ticker;

// Re-export main types
pub use countdown_ticker::{Canceller, TickStep, Ticker, TickerHandle};
