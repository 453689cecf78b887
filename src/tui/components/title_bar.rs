//! # TitleBar Component
//!
//! Top line: the journal day, how many habits are done, and a sync
//! indicator while writes are still in flight.
//!
//! ```text
//! Habits · Tue, Mar 05            3/7 done · syncing (2)
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar<'a> {
    /// Pre-formatted day, e.g. "Tue, Mar 05".
    pub date: String,
    pub done: usize,
    pub total: usize,
    pub pending_calls: usize,
    pub theme: &'a Theme,
}

impl TitleBar<'_> {
    pub fn summary(&self) -> String {
        if self.pending_calls > 0 {
            format!("{}/{} done · syncing ({})", self.done, self.total, self.pending_calls)
        } else {
            format!("{}/{} done", self.done, self.total)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = Line::from(vec![
            Span::styled("Habits", self.theme.header),
            Span::styled(format!(" · {}", self.date), self.theme.muted),
        ]);
        let summary = self.summary();
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(summary.width() as u16)])
                .areas(area);

        frame.render_widget(Paragraph::new(left), left_area);
        let right = Line::from(Span::styled(summary, self.theme.muted));
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), right_area);
    }
}
