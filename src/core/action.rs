//! # Actions
//!
//! Everything that can happen in habitui becomes an `Action`.
//! User presses `l`? That's `Action::Increment`.
//! The journal arrives? That's `Action::JournalLoaded(habits)`.
//!
//! `update()` applies an action to the `App` and returns an `Effect`
//! describing the I/O the event loop should start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Optimistic updates
//!
//! Progress and status changes are applied to the store immediately and
//! the remote call is fired afterwards. Its result only sets the banner;
//! local state is never rolled back, and overlapping calls for the same
//! habit are neither sequenced nor coalesced.

use log::{debug, info, warn};
use std::time::Instant;

use crate::core::habit::{Habit, Status, format_amount};
use crate::core::state::{App, Phase};

/// Rows moved by PageUp / PageDown.
pub const PAGE_SIZE: isize = 10;

pub const MSG_SUCCESS: &str = "Operation successful";
pub const MSG_NEGATIVE: &str = "Progress can't go below zero";
pub const MSG_ALREADY_COMPLETE: &str = "Already completed";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Kick off the startup fetch.
    Start,
    Quit,
    MoveCursor(isize),
    CursorFirst,
    CursorLast,
    Increment,
    Decrement,
    ToggleSkip,
    Complete,
    JournalLoaded(Vec<Habit>),
    JournalFailed(String),
    /// A post/put finished. `outcome` is the HTTP status or a transport error.
    RemoteFinished {
        request: RemoteRequest,
        outcome: Result<u16, String>,
    },
    /// Periodic clock tick, used to expire the status banner.
    Tick(Instant),
}

/// A fire-and-forget write to the service.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRequest {
    Log {
        habit_id: String,
        unit_type: String,
        value: f64,
    },
    Status {
        habit_id: String,
        status: Status,
    },
}

impl RemoteRequest {
    pub fn habit_id(&self) -> &str {
        match self {
            RemoteRequest::Log { habit_id, .. } | RemoteRequest::Status { habit_id, .. } => habit_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchJournal,
    Send(RemoteRequest),
    /// Unrecoverable; the loop stops and the message goes to stderr.
    Fatal(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Start => Effect::FetchJournal,
        Action::Quit => {
            app.phase = Phase::Exiting;
            Effect::Quit
        }
        Action::JournalLoaded(habits) => {
            info!("Journal loaded with {} habits", habits.len());
            app.store.replace(habits);
            app.phase = Phase::Ready;
            Effect::None
        }
        Action::JournalFailed(err) => {
            warn!("Journal fetch failed: {}", err);
            app.phase = Phase::Exiting;
            Effect::Fatal(format!("Failed to fetch habits: {err}"))
        }
        Action::RemoteFinished { request, outcome } => {
            app.pending_calls = app.pending_calls.saturating_sub(1);
            report_outcome(app, &request, outcome);
            Effect::None
        }
        Action::Tick(now) => {
            if app.status.as_ref().is_some_and(|s| s.expires_at <= now) {
                app.status = None;
            }
            Effect::None
        }
        // Everything below needs a list
        _ if app.phase != Phase::Ready => Effect::None,
        Action::MoveCursor(delta) => {
            app.store.move_cursor(delta);
            app.status = None;
            Effect::None
        }
        Action::CursorFirst => {
            app.store.cursor_first();
            app.status = None;
            Effect::None
        }
        Action::CursorLast => {
            app.store.cursor_last();
            app.status = None;
            Effect::None
        }
        Action::Increment => adjust_progress(app, 1.0),
        Action::Decrement => adjust_progress(app, -1.0),
        Action::ToggleSkip => toggle_skip(app),
        Action::Complete => complete(app),
    }
}

fn adjust_progress(app: &mut App, delta: f64) -> Effect {
    let index = app.store.cursor();
    let Some(habit) = app.store.get(index) else {
        return Effect::None;
    };

    let new_value = habit.progress.current + delta;
    if new_value < 0.0 {
        app.error(MSG_NEGATIVE);
        return Effect::None;
    }

    let request = RemoteRequest::Log {
        habit_id: habit.id.clone(),
        unit_type: habit.goal_unit.clone(),
        value: delta,
    };
    app.store.update_at(index, |h| h.set_current(new_value));
    dispatch(app, request)
}

fn toggle_skip(app: &mut App) -> Effect {
    let index = app.store.cursor();
    let Some(habit) = app.store.get(index) else {
        return Effect::None;
    };

    let status = if habit.status == Status::Skipped {
        Status::InProgress
    } else {
        Status::Skipped
    };
    let request = RemoteRequest::Status {
        habit_id: habit.id.clone(),
        status,
    };
    app.store.update_at(index, |h| h.status = status);
    dispatch(app, request)
}

/// Logs whatever is left to reach the target in one go.
fn complete(app: &mut App) -> Effect {
    let index = app.store.cursor();
    let Some(habit) = app.store.get(index) else {
        return Effect::None;
    };

    if habit.is_complete() {
        app.info(MSG_ALREADY_COMPLETE);
        return Effect::None;
    }

    let target = habit.progress.target;
    let request = RemoteRequest::Log {
        habit_id: habit.id.clone(),
        unit_type: habit.goal_unit.clone(),
        value: habit.remaining(),
    };
    app.store.update_at(index, |h| h.set_current(target));
    dispatch(app, request)
}

fn dispatch(app: &mut App, request: RemoteRequest) -> Effect {
    app.pending_calls += 1;
    Effect::Send(request)
}

fn report_outcome(app: &mut App, request: &RemoteRequest, outcome: Result<u16, String>) {
    let name = app
        .store
        .find(request.habit_id())
        .map(|h| h.name.clone())
        .unwrap_or_else(|| request.habit_id().to_string());

    match outcome {
        Ok(200) => {
            if let RemoteRequest::Log { value, .. } = request {
                debug!("Logged {} for {}", format_amount(*value), name);
            }
            app.info(MSG_SUCCESS);
        }
        Ok(code) => {
            warn!("Remote write for {} rejected with HTTP {}", name, code);
            app.error(format!("Operation failed: {name} (HTTP {code})"));
        }
        Err(err) => {
            warn!("Remote write for {} failed: {}", name, err);
            app.error(format!("Operation failed: {name} ({err})"));
        }
    }
}
