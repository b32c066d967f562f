//! Ticker state and terminal outcomes

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Message used when no finish message is configured
pub const DEFAULT_FINISH_MESSAGE: &str = "Time is Up!";

/// State of the countdown ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TickerState {
    /// Counting; the next tick renders `remaining`
    Running { remaining: i64 },
    /// Rendered once and stopped rescheduling
    Idle,
    /// Remaining time went negative
    Expired,
    /// Stopped from outside before reaching a natural end
    Cancelled,
}

impl TickerState {
    /// Create the initial running state
    pub fn running(remaining: i64) -> Self {
        Self::Running { remaining }
    }

    /// Check if no further ticks will happen
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running { .. })
    }

    /// Get remaining seconds if the ticker is running
    pub fn remaining_seconds(&self) -> Option<i64> {
        match self {
            Self::Running { remaining } => Some(*remaining),
            _ => None,
        }
    }
}

/// Raised once when the countdown runs out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryEvent {
    /// Notification text for the user
    pub message: String,
    /// Where the host should navigate next
    pub redirect_target: String,
    /// Number of frames rendered before expiry
    pub frames_rendered: u64,
    pub expired_at: DateTime<Utc>,
}

impl ExpiryEvent {
    pub fn new(finish_message: &str, redirect_target: &str, frames_rendered: u64) -> Self {
        let message = if finish_message.is_empty() {
            DEFAULT_FINISH_MESSAGE.to_string()
        } else {
            finish_message.to_string()
        };

        Self {
            message,
            redirect_target: redirect_target.to_string(),
            frames_rendered,
            expired_at: Utc::now(),
        }
    }
}

/// How a ticker finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerOutcome {
    Expired(ExpiryEvent),
    Idle,
    Cancelled,
}

impl TickerOutcome {
    /// The terminal state matching this outcome
    pub fn state(&self) -> TickerState {
        match self {
            Self::Expired(_) => TickerState::Expired,
            Self::Idle => TickerState::Idle,
            Self::Cancelled => TickerState::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TickerState::running(3).is_terminal());
        assert!(TickerState::Idle.is_terminal());
        assert!(TickerState::Expired.is_terminal());
        assert!(TickerState::Cancelled.is_terminal());
    }

    #[test]
    fn test_remaining_only_while_running() {
        assert_eq!(TickerState::running(-1).remaining_seconds(), Some(-1));
        assert_eq!(TickerState::Idle.remaining_seconds(), None);
    }

    #[test]
    fn test_expiry_message_fallback() {
        let event = ExpiryEvent::new("", "task_c1.php", 6);
        assert_eq!(event.message, "Time is Up!");

        let event = ExpiryEvent::new("It is finally here!", "k1.php", 0);
        assert_eq!(event.message, "It is finally here!");
        assert_eq!(event.redirect_target, "k1.php");
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&TickerState::running(5)).unwrap();
        assert_eq!(json, r#"{"state":"running","remaining":5}"#);
        let json = serde_json::to_string(&TickerState::Idle).unwrap();
        assert_eq!(json, r#"{"state":"idle"}"#);
    }
}
