//! # Loading Component
//!
//! Spinner shown until the journal arrives.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

const SPINNER: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_frame(frame_index: usize) -> &'static str {
    SPINNER[frame_index % SPINNER.len()]
}

pub struct Loading<'a> {
    pub frame_index: usize,
    pub theme: &'a Theme,
}

impl Component for Loading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [center] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);

        let line = Line::from(vec![
            Span::styled(spinner_frame(self.frame_index), self.theme.spinner),
            Span::raw(" Loading habits… "),
            Span::styled("(q to quit)", self.theme.muted),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), center);
    }
}
