//! # Habit Domain Types
//!
//! The local, UI-facing view of one journal entry. Wire shapes live in
//! `remote::types` and are converted into these on arrival.
//!
//! ```text
//! Habit
//! ├── id: String            // opaque remote id
//! ├── name: String
//! ├── status: Status        // completed | in_progress | failed | skipped | none
//! ├── progress: Progress    // current / target, unit, periodicity
//! ├── goal_unit: String     // unit_type sent back with every log
//! ├── area: Option<String>
//! └── kind: HabitKind       // good | bad
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Journal status of a habit for the target day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Completed,
    InProgress,
    Failed,
    Skipped,
    /// Anything the service reports that we don't model (e.g. "none").
    #[default]
    #[serde(other)]
    None,
}

impl Status {
    /// Wire name, as the service expects it in `PUT /status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::InProgress => "in_progress",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::None => "none",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a habit is something to build up or something to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HabitKind {
    #[default]
    Good,
    Bad,
}

impl HabitKind {
    /// Maps the service's numeric `habit_type` (1 = good, 2 = bad).
    pub fn from_code(code: i64) -> Self {
        if code == 2 { HabitKind::Bad } else { HabitKind::Good }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Progress {
    pub current: f64,
    pub target: f64,
    pub unit: String,
    pub periodicity: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub progress: Progress,
    pub goal_unit: String,
    pub area: Option<String>,
    pub kind: HabitKind,
}

impl Habit {
    pub fn is_complete(&self) -> bool {
        self.progress.current >= self.progress.target
    }

    /// Remaining amount to reach the target; zero once reached or exceeded.
    pub fn remaining(&self) -> f64 {
        (self.progress.target - self.progress.current).max(0.0)
    }

    /// Sets the current value and derives the matching status.
    ///
    /// Callers must reject negative values before getting here.
    pub fn set_current(&mut self, value: f64) {
        self.progress.current = value;
        self.status = if value == self.progress.target {
            Status::Completed
        } else {
            Status::InProgress
        };
    }
}

/// Formats a progress amount without a trailing `.0` for whole numbers.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::habit;

    #[test]
    fn test_status_parses_known_and_unknown_values() {
        let parsed: Vec<Status> =
            serde_json::from_str(r#"["completed","in_progress","failed","skipped","none","weird"]"#)
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                Status::Completed,
                Status::InProgress,
                Status::Failed,
                Status::Skipped,
                Status::None,
                Status::None,
            ]
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(Status::InProgress.as_str(), "in_progress");
        assert_eq!(Status::Skipped.to_string(), "skipped");
    }

    #[test]
    fn test_kind_from_code() {
        assert_eq!(HabitKind::from_code(1), HabitKind::Good);
        assert_eq!(HabitKind::from_code(2), HabitKind::Bad);
        assert_eq!(HabitKind::from_code(0), HabitKind::Good);
    }

    #[test]
    fn test_set_current_derives_status() {
        let mut h = habit("h1", 4.0, 5.0, Status::InProgress);
        h.set_current(5.0);
        assert_eq!(h.status, Status::Completed);
        h.set_current(6.0);
        assert_eq!(h.status, Status::InProgress);
        h.set_current(0.0);
        assert_eq!(h.status, Status::InProgress);
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(habit("h1", 2.0, 5.0, Status::InProgress).remaining(), 3.0);
        assert_eq!(habit("h1", 7.0, 5.0, Status::InProgress).remaining(), 0.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(0.0), "0");
    }
}
