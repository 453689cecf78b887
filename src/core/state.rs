//! # Application State
//!
//! Core business state for habitui. No TUI-specific types live here;
//! presentation state (list scroll offset, theme) is in the `tui` module.
//!
//! ```text
//! App
//! ├── phase: Phase                  // Loading → Ready → Exiting
//! ├── store: HabitStore             // habits + cursor
//! ├── status: Option<StatusMessage> // transient banner
//! ├── date: DateTime<Local>         // journal day, sent with every call
//! ├── status_lifetime: Duration     // how long a banner stays up
//! └── pending_calls: usize          // post/put calls still in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use crate::core::config::DEFAULT_STATUS_LIFETIME_MS;
use crate::core::store::HabitStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the initial journal fetch.
    Loading,
    /// List populated, accepting input.
    Ready,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// A banner shown under the list until it expires or the user navigates.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: MessageLevel,
    pub expires_at: Instant,
}

pub struct App {
    pub phase: Phase,
    pub store: HabitStore,
    pub status: Option<StatusMessage>,
    pub date: DateTime<Local>,
    pub status_lifetime: Duration,
    pub pending_calls: usize,
}

impl App {
    pub fn new(date: DateTime<Local>) -> Self {
        Self {
            phase: Phase::Loading,
            store: HabitStore::new(),
            status: None,
            date,
            status_lifetime: Duration::from_millis(DEFAULT_STATUS_LIFETIME_MS),
            pending_calls: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), MessageLevel::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), MessageLevel::Error);
    }

    fn set_status(&mut self, text: String, level: MessageLevel) {
        self.status = Some(StatusMessage {
            text,
            level,
            expires_at: Instant::now() + self.status_lifetime,
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }
}
