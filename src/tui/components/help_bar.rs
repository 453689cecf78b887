//! # HelpBar Component
//!
//! Bottom two lines: the transient status message (if any) and the key
//! bindings that currently apply to the focused habit.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::habit::{Habit, HabitKind};
use crate::core::state::StatusMessage;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub keys: &'static str,
    pub label: &'static str,
}

const fn hint(keys: &'static str, label: &'static str) -> KeyHint {
    KeyHint { keys, label }
}

/// Bindings valid for the focused habit. Decrement only shows while
/// there is progress to take back.
pub fn key_hints(focused: Option<&Habit>) -> Vec<KeyHint> {
    let mut hints = vec![hint("↑/k", "up"), hint("↓/j", "down")];

    if let Some(habit) = focused {
        let increment = if habit.kind == HabitKind::Bad { "log slip" } else { "+1" };
        hints.push(hint("l/→", increment));
        if habit.progress.current > 0.0 {
            hints.push(hint("h/←", "-1"));
        }
        hints.push(hint("s", "skip"));
        if !habit.is_complete() {
            hints.push(hint("enter", "complete"));
        }
    }

    hints.push(hint("q", "quit"));
    hints
}

pub struct HelpBar<'a> {
    pub hints: Vec<KeyHint>,
    pub status: Option<&'a StatusMessage>,
    pub theme: &'a Theme,
}

impl Component for HelpBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status_line = match self.status {
            Some(msg) => Line::from(Span::styled(msg.text.clone(), self.theme.message(msg.level))),
            None => Line::default(),
        };

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, h) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", self.theme.muted));
            }
            spans.push(Span::raw(h.keys));
            spans.push(Span::styled(format!(" {}", h.label), self.theme.muted));
        }

        let paragraph = Paragraph::new(vec![status_line, Line::from(spans)]);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::habit::Status;
    use crate::core::state::MessageLevel;
    use crate::test_support::habit;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn labels(hints: &[KeyHint]) -> Vec<&'static str> {
        hints.iter().map(|h| h.label).collect()
    }

    #[test]
    fn test_hints_without_focus() {
        assert_eq!(labels(&key_hints(None)), vec!["up", "down", "quit"]);
    }

    #[test]
    fn test_decrement_hidden_at_zero() {
        let h = habit("h1", 0.0, 3.0, Status::InProgress);
        assert_eq!(
            labels(&key_hints(Some(&h))),
            vec!["up", "down", "+1", "skip", "complete", "quit"]
        );
    }

    #[test]
    fn test_decrement_shown_with_progress_and_complete_hidden_when_done() {
        let h = habit("h1", 3.0, 3.0, Status::Completed);
        assert_eq!(
            labels(&key_hints(Some(&h))),
            vec!["up", "down", "+1", "-1", "skip", "quit"]
        );
    }

    #[test]
    fn test_bad_habit_increment_label() {
        let mut h = habit("h1", 0.0, 1.0, Status::None);
        h.kind = HabitKind::Bad;
        assert!(labels(&key_hints(Some(&h))).contains(&"log slip"));
    }

    #[test]
    fn test_render_mirrors_status_message() {
        let backend = TestBackend::new(80, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        let msg = StatusMessage {
            text: "Operation successful".to_string(),
            level: MessageLevel::Info,
            expires_at: Instant::now(),
        };

        terminal
            .draw(|f| {
                HelpBar {
                    hints: key_hints(None),
                    status: Some(&msg),
                    theme: &theme,
                }
                .render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Operation successful"));
        assert!(text.contains("↑/k up"));
        assert!(text.contains("q quit"));
    }
}
