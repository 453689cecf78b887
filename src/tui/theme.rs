//! # Theme
//!
//! Every style the renderer uses, in one record handed down to components.

use ratatui::style::{Color, Modifier, Style};

use crate::core::habit::Status;
use crate::core::state::MessageLevel;

// https://atlassian.design/foundations/color
pub const RED: Color = Color::Rgb(0xFF, 0x56, 0x30);
pub const GREEN: Color = Color::Rgb(0x36, 0xB3, 0x7E);
pub const YELLOW: Color = Color::Rgb(0xFF, 0xC4, 0x00);
pub const GRAY: Color = Color::Rgb(0x5E, 0x6C, 0x84);

#[derive(Debug, Clone)]
pub struct Theme {
    pub completed: Style,
    pub in_progress: Style,
    pub failed: Style,
    pub skipped: Style,
    pub muted: Style,
    pub selected: Style,
    pub header: Style,
    pub info: Style,
    pub error: Style,
    pub spinner: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            completed: Style::default().fg(GREEN),
            in_progress: Style::default().fg(YELLOW),
            failed: Style::default().fg(RED),
            skipped: Style::default().fg(GRAY),
            muted: Style::default().fg(GRAY),
            selected: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            header: Style::default().add_modifier(Modifier::BOLD),
            info: Style::default().fg(GREEN),
            error: Style::default().fg(RED),
            spinner: Style::default().fg(YELLOW),
        }
    }
}

impl Theme {
    pub fn status(&self, status: Status) -> Style {
        match status {
            Status::Completed => self.completed,
            Status::InProgress => self.in_progress,
            Status::Failed => self.failed,
            Status::Skipped => self.skipped,
            Status::None => Style::default(),
        }
    }

    pub fn message(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => self.info,
            MessageLevel::Error => self.error,
        }
    }
}
