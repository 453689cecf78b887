//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Keystrokes and remote completions are folded into one serialized stream
//! of `Action`s, applied one at a time through `core::action::update`.
//! Remote calls run as tokio tasks and report back over an mpsc channel,
//! so the terminal stays responsive while they are in flight.
//!
//! - **Loading**: redraws every ~80ms to animate the spinner.
//! - **Ready**: sleeps up to 250ms between polls, redrawing only when an
//!   event arrived or the status banner expired.

mod component;
pub mod components;
pub mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::fmt;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, PAGE_SIZE, RemoteRequest, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::remote::{HabitClient, HabitifyClient, RemoteError};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub list_state: ListState,
    pub theme: Theme,
}

/// Why the interactive session ended abnormally.
#[derive(Debug)]
pub enum RunError {
    Io(std::io::Error),
    Remote(RemoteError),
    /// Startup could not produce a usable list (e.g. journal fetch failed).
    Fatal(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "terminal error: {e}"),
            RunError::Remote(e) => write!(f, "{e}"),
            RunError::Fatal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        RunError::Io(e)
    }
}

/// What the loop should do after applying an action.
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
    Fatal(String),
}

pub fn run(config: &ResolvedConfig, date: DateTime<Local>) -> Result<(), RunError> {
    let client: Arc<dyn HabitClient> =
        Arc::new(HabitifyClient::from_config(config).map_err(RunError::Remote)?);

    let mut app = App::new(date);
    app.status_lifetime = config.status_lifetime;
    let mut tui = TuiState::default();

    let mut terminal = ratatui::try_init()?;
    let result = event_loop(&mut terminal, &mut app, &mut tui, client);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    client: Arc<dyn HabitClient>,
) -> Result<(), RunError> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let flow = apply(app, Action::Start, &client, &tx);
    if let Flow::Fatal(msg) = flow {
        return Err(RunError::Fatal(msg));
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        // Expire the banner; redraw only if it actually went away
        let had_status = app.status.is_some();
        apply(app, Action::Tick(Instant::now()), &client, &tx);
        if had_status && app.status.is_none() {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending keystrokes before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = action_for(event) else {
                continue;
            };
            match apply(app, action, &client, &tx) {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
                Flow::Fatal(msg) => return Err(RunError::Fatal(msg)),
            }
        }

        // Fold in completed background calls
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match apply(app, action, &client, &tx) {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
                Flow::Fatal(msg) => return Err(RunError::Fatal(msg)),
            }
        }
    }
}

/// Maps a terminal event to the core action it triggers.
fn action_for(event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Up => Some(Action::MoveCursor(-1)),
        TuiEvent::Down => Some(Action::MoveCursor(1)),
        TuiEvent::PageUp => Some(Action::MoveCursor(-PAGE_SIZE)),
        TuiEvent::PageDown => Some(Action::MoveCursor(PAGE_SIZE)),
        TuiEvent::Home => Some(Action::CursorFirst),
        TuiEvent::End => Some(Action::CursorLast),
        TuiEvent::Increment => Some(Action::Increment),
        TuiEvent::Decrement => Some(Action::Decrement),
        TuiEvent::Skip => Some(Action::ToggleSkip),
        TuiEvent::Complete => Some(Action::Complete),
        // Resize just needs a redraw
        TuiEvent::Resize => None,
    }
}

/// Runs `update` and starts whatever I/O the resulting effect asks for.
fn apply(
    app: &mut App,
    action: Action,
    client: &Arc<dyn HabitClient>,
    tx: &mpsc::Sender<Action>,
) -> Flow {
    match update(app, action) {
        Effect::None => Flow::Continue,
        Effect::Quit => Flow::Quit,
        Effect::FetchJournal => {
            spawn_fetch(client.clone(), app.date, tx.clone());
            Flow::Continue
        }
        Effect::Send(request) => {
            spawn_send(request, client.clone(), app.date, tx.clone());
            Flow::Continue
        }
        Effect::Fatal(msg) => Flow::Fatal(msg),
    }
}

fn spawn_fetch(
    client: Arc<dyn HabitClient>,
    date: DateTime<Local>,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning journal fetch");
    tokio::spawn(async move {
        let action = match client.fetch_journal(date).await {
            Ok(habits) => Action::JournalLoaded(habits),
            Err(e) => Action::JournalFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver journal: receiver dropped");
        }
    })
}

fn spawn_send(
    request: RemoteRequest,
    client: Arc<dyn HabitClient>,
    date: DateTime<Local>,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning remote write for {}", request.habit_id());
    tokio::spawn(async move {
        let result = match &request {
            RemoteRequest::Log {
                habit_id,
                unit_type,
                value,
            } => client.post_log(habit_id, unit_type, *value, date).await,
            RemoteRequest::Status { habit_id, status } => {
                client.put_status(habit_id, *status, date).await
            }
        };
        let outcome = result.map_err(|e| e.to_string());
        if tx.send(Action::RemoteFinished { request, outcome }).is_err() {
            warn!("Failed to deliver remote result: receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::habit::Status;
    use crate::core::state::Phase;
    use crate::test_support::{Call, FakeClient, habit, test_date};

    fn channel() -> (mpsc::Sender<Action>, mpsc::Receiver<Action>) {
        mpsc::channel()
    }

    #[test]
    fn test_run_error_display() {
        let fatal = RunError::Fatal("Failed to load journal: timeout".into());
        assert_eq!(fatal.to_string(), "Failed to load journal: timeout");

        let io: RunError = std::io::Error::other("no tty").into();
        assert!(matches!(io, RunError::Io(_)));
        assert_eq!(io.to_string(), "terminal error: no tty");
    }

    #[test]
    fn test_action_for_keys() {
        assert_eq!(action_for(TuiEvent::ForceQuit), Some(Action::Quit));
        assert_eq!(action_for(TuiEvent::Down), Some(Action::MoveCursor(1)));
        assert_eq!(action_for(TuiEvent::PageUp), Some(Action::MoveCursor(-PAGE_SIZE)));
        assert_eq!(action_for(TuiEvent::Skip), Some(Action::ToggleSkip));
        assert_eq!(action_for(TuiEvent::Resize), None);
    }

    #[tokio::test]
    async fn test_spawn_fetch_delivers_journal() {
        let fake = Arc::new(FakeClient::new(vec![habit("h1", 0.0, 1.0, Status::None)], 200));
        let (tx, rx) = channel();

        spawn_fetch(fake.clone(), test_date(), tx).await.unwrap();

        match rx.try_recv().unwrap() {
            Action::JournalLoaded(habits) => assert_eq!(habits.len(), 1),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(fake.calls(), vec![Call::Fetch]);
    }

    #[tokio::test]
    async fn test_spawn_fetch_failure_reports_error() {
        let fake = Arc::new(FakeClient::failing("connection refused"));
        let (tx, rx) = channel();

        spawn_fetch(fake, test_date(), tx).await.unwrap();

        match rx.try_recv().unwrap() {
            Action::JournalFailed(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_send_routes_to_client() {
        let fake = Arc::new(FakeClient::new(Vec::new(), 500));
        let (tx, rx) = channel();
        let request = RemoteRequest::Status {
            habit_id: "h1".into(),
            status: Status::Skipped,
        };

        spawn_send(request.clone(), fake.clone(), test_date(), tx).await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::RemoteFinished {
                request,
                outcome: Ok(500),
            }
        );
        assert_eq!(
            fake.calls(),
            vec![Call::Status {
                habit_id: "h1".into(),
                status: Status::Skipped,
            }]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_increment_through_effects() {
        let fake = Arc::new(FakeClient::new(
            vec![habit("h1", 2.0, 5.0, Status::InProgress)],
            200,
        ));
        let client: Arc<dyn HabitClient> = fake.clone();
        let (tx, rx) = channel();
        let mut app = App::new(test_date());

        assert_eq!(update(&mut app, Action::Start), Effect::FetchJournal);
        spawn_fetch(client.clone(), app.date, tx.clone()).await.unwrap();
        let loaded = rx.try_recv().unwrap();
        assert_eq!(apply(&mut app, loaded, &client, &tx), Flow::Continue);
        assert_eq!(app.phase, Phase::Ready);

        for _ in 0..3 {
            let effect = update(&mut app, Action::Increment);
            let Effect::Send(request) = effect else {
                panic!("expected a remote request");
            };
            spawn_send(request, client.clone(), app.date, tx.clone()).await.unwrap();
        }
        let h = app.store.selected().unwrap();
        assert_eq!(h.progress.current, 5.0);
        assert_eq!(h.status, Status::Completed);

        let logs = fake
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Log { value, .. } if *value == 1.0))
            .count();
        assert_eq!(logs, 3);
    }

    #[test]
    fn test_quit_flow() {
        let client: Arc<dyn HabitClient> = Arc::new(FakeClient::new(Vec::new(), 200));
        let (tx, _rx) = channel();
        let mut app = App::new(test_date());
        assert_eq!(apply(&mut app, Action::Quit, &client, &tx), Flow::Quit);
    }

    #[test]
    fn test_fatal_flow() {
        let client: Arc<dyn HabitClient> = Arc::new(FakeClient::new(Vec::new(), 200));
        let (tx, _rx) = channel();
        let mut app = App::new(test_date());
        let flow = apply(&mut app, Action::JournalFailed("boom".into()), &client, &tx);
        assert_eq!(flow, Flow::Fatal("Failed to fetch habits: boom".into()));
    }
}
