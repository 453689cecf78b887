//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};

use crate::core::habit::{Habit, HabitKind, Progress, Status};
use crate::core::state::App;
use crate::remote::{HabitClient, RemoteError};

/// Builds a good habit counted in "times" per day.
pub fn habit(id: &str, current: f64, target: f64, status: Status) -> Habit {
    Habit {
        id: id.to_string(),
        name: format!("Habit {}", id.trim_start_matches('h')),
        status,
        progress: Progress {
            current,
            target,
            unit: "times".to_string(),
            periodicity: "daily".to_string(),
        },
        goal_unit: "rep".to_string(),
        area: None,
        kind: HabitKind::Good,
    }
}

/// `count` fresh habits with ids `h0..hN`.
pub fn habits(count: usize) -> Vec<Habit> {
    (0..count)
        .map(|i| habit(&format!("h{i}"), 0.0, 3.0, Status::InProgress))
        .collect()
}

/// A fixed target date so tests don't depend on the clock.
pub fn test_date() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
}

/// Creates an App already past loading, holding `habits`.
pub fn ready_app(habits: Vec<Habit>) -> App {
    let mut app = App::new(test_date());
    crate::core::action::update(&mut app, crate::core::action::Action::JournalLoaded(habits));
    app
}

/// A single remote call observed by [`FakeClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch,
    Log { habit_id: String, unit_type: String, value: f64 },
    Status { habit_id: String, status: Status },
}

/// In-memory `HabitClient` that records calls and answers with canned results.
pub struct FakeClient {
    pub journal: Result<Vec<Habit>, String>,
    pub code: u16,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub fn new(journal: Vec<Habit>, code: u16) -> Self {
        Self {
            journal: Ok(journal),
            code,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            journal: Err(message.to_string()),
            code: 500,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HabitClient for FakeClient {
    async fn fetch_journal(&self, _date: DateTime<Local>) -> Result<Vec<Habit>, RemoteError> {
        self.calls.lock().unwrap().push(Call::Fetch);
        self.journal.clone().map_err(RemoteError::Network)
    }

    async fn post_log(
        &self,
        habit_id: &str,
        unit_type: &str,
        value: f64,
        _date: DateTime<Local>,
    ) -> Result<u16, RemoteError> {
        self.calls.lock().unwrap().push(Call::Log {
            habit_id: habit_id.to_string(),
            unit_type: unit_type.to_string(),
            value,
        });
        Ok(self.code)
    }

    async fn put_status(
        &self,
        habit_id: &str,
        status: Status,
        _date: DateTime<Local>,
    ) -> Result<u16, RemoteError> {
        self.calls.lock().unwrap().push(Call::Status {
            habit_id: habit_id.to_string(),
            status,
        });
        Ok(self.code)
    }
}
