//! # HabitList Component
//!
//! One row per habit:
//!
//! ```text
//! > [x] Read            20/20 pages • Learning
//!   [-] Drink water      3/8 glasses
//!   [/] Smoke (bad)      0/1 rep
//! ```
//!
//! Follows the persistent state + transient wrapper pattern: the
//! `ListState` (scroll offset) lives in `TuiState`, and a `HabitList`
//! borrowing it is built each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::habit::{Habit, HabitKind, Status, format_amount};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Glyph shown between the brackets for each status.
pub fn status_glyph(status: Status) -> char {
    match status {
        Status::Completed => 'x',
        Status::Failed => 'f',
        Status::InProgress => '-',
        Status::Skipped => '/',
        Status::None => ' ',
    }
}

/// `current/target unit`, e.g. `3/8 glasses`.
pub fn progress_label(habit: &Habit) -> String {
    let mut label = format!(
        "{}/{}",
        format_amount(habit.progress.current),
        format_amount(habit.progress.target)
    );
    if !habit.progress.unit.is_empty() {
        label.push(' ');
        label.push_str(&habit.progress.unit);
    }
    label
}

/// Pads `name` with spaces to `width` display columns.
fn pad_to(name: &str, width: usize) -> String {
    let used = name.width();
    format!("{name}{}", " ".repeat(width.saturating_sub(used)))
}

pub fn row_line<'a>(habit: &Habit, selected: bool, name_width: usize, theme: &Theme) -> Line<'a> {
    let marker = if selected { "> " } else { "  " };
    let name_style = if selected { theme.selected } else { Style::default() };

    let mut name = habit.name.clone();
    if habit.kind == HabitKind::Bad {
        name.push_str(" (bad)");
    }

    let mut spans = vec![
        Span::raw(marker),
        Span::raw("["),
        Span::styled(status_glyph(habit.status).to_string(), theme.status(habit.status)),
        Span::raw("] "),
        Span::styled(pad_to(&name, name_width), name_style),
        Span::raw("  "),
        Span::styled(progress_label(habit), theme.muted),
    ];
    if let Some(area) = &habit.area {
        spans.push(Span::styled(format!(" • {area}"), theme.muted));
    }
    Line::from(spans)
}

pub struct HabitList<'a> {
    pub habits: &'a [Habit],
    pub cursor: usize,
    pub list_state: &'a mut ListState,
    pub theme: &'a Theme,
}

impl Component for HabitList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.habits.is_empty() {
            let empty = Line::from(Span::styled("No habits for this day.", self.theme.muted));
            frame.render_widget(empty, area);
            return;
        }

        let name_width = self
            .habits
            .iter()
            .map(|h| h.name.width() + if h.kind == HabitKind::Bad { 6 } else { 0 })
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = self
            .habits
            .iter()
            .enumerate()
            .map(|(i, habit)| ListItem::new(row_line(habit, i == self.cursor, name_width, self.theme)))
            .collect();

        // Keep the widget's scroll offset following the store's cursor
        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), area, self.list_state);
    }
}
