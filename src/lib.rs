//! Countdown Widget - a self-rescheduling countdown display
//!
//! This library formats remaining time into a display template, renders it
//! to a display surface once per tick and reports a terminal event when the
//! countdown expires, goes idle or is cancelled.

pub mod config;
pub mod display;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, CountdownConfig, CountdownSettings};
pub use display::{format_remaining, DisplaySurface, MemorySurface};
pub use state::{ExpiryEvent, TickerOutcome, TickerState};
pub use tasks::{Ticker, TickerHandle};
pub use utils::signals::shutdown_signal;
