use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::habit::Status;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::help_bar::key_hints;
use crate::tui::components::{HabitList, HelpBar, Loading, TitleBar};

/// Draws one frame. Reads `app`, never mutates it; only the list scroll
/// offset in `tui` is updated.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    if app.is_loading() && app.store.is_empty() {
        Loading {
            frame_index: spinner_frame,
            theme: &tui.theme,
        }
        .render(frame, frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(2)]);
    let [title_area, _gap, list_area, help_area] = layout.areas(frame.area());

    let habits = app.store.habits();
    TitleBar {
        date: app.date.format("%a, %b %d").to_string(),
        done: habits.iter().filter(|h| h.status == Status::Completed).count(),
        total: habits.len(),
        pending_calls: app.pending_calls,
        theme: &tui.theme,
    }
    .render(frame, title_area);

    HabitList {
        habits,
        cursor: app.store.cursor(),
        list_state: &mut tui.list_state,
        theme: &tui.theme,
    }
    .render(frame, list_area);

    HelpBar {
        hints: key_hints(app.store.selected()),
        status: app.status.as_ref(),
        theme: &tui.theme,
    }
    .render(frame, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{habit, ready_app, test_date};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> Vec<String> {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::default();
        terminal.draw(|f| draw_ui(f, app, &mut tui, 0)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..8u16)
            .map(|y| (0..60u16).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_loading_frame() {
        let app = App::new(test_date());
        let screen = render(&app).join("\n");
        assert!(screen.contains("Loading habits"));
        assert!(screen.contains("q to quit"));
    }

    #[test]
    fn test_ready_frame_layout() {
        let mut app = ready_app(vec![
            habit("h1", 2.0, 5.0, Status::InProgress),
            habit("h2", 1.0, 1.0, Status::Completed),
        ]);
        app.info("Operation successful");

        let rows = render(&app);
        assert!(rows[0].starts_with("Habits · Tue, Mar 05"));
        assert!(rows[0].contains("1/2 done"));
        assert!(rows[2].starts_with("> [-] Habit 1"));
        assert!(rows[2].contains("2/5 times"));
        assert!(rows[3].starts_with("  [x] Habit 2"));
        assert!(rows[6].contains("Operation successful"));
        assert!(rows[7].contains("h/← -1"));
    }

    #[test]
    fn test_frame_follows_cursor_and_mutation() {
        let mut app = ready_app(vec![
            habit("h1", 0.0, 1.0, Status::InProgress),
            habit("h2", 0.0, 1.0, Status::InProgress),
        ]);
        update(&mut app, Action::MoveCursor(1));
        update(&mut app, Action::Increment);

        let rows = render(&app);
        assert!(rows[0].contains("syncing (1)"));
        assert!(rows[2].starts_with("  [-] Habit 1"));
        assert!(rows[3].starts_with("> [x] Habit 2"));
        assert!(!rows[7].contains("complete"));
    }

    #[test]
    fn test_decrement_hint_hidden_at_zero() {
        let app = ready_app(vec![habit("h1", 0.0, 1.0, Status::InProgress)]);
        let rows = render(&app);
        assert!(!rows[7].contains("-1"));
        assert!(rows[7].contains("+1"));
    }
}
