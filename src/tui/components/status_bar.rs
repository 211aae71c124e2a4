//! # StatusBar Component
//!
//! Top line: document name, mode, position and key hints.
//!
//! ```text
//!  notes.md │ deck │ section 2/5                Tab pages · ↑↓ move · q quit
//! ```
//!
//! Purely presentational. Every field is a prop supplied by the event loop.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::Mode;
use crate::tui::component::Component;

pub struct StatusBar {
    pub document_name: String,
    pub mode: Mode,
    /// e.g. "section 2/5" or "page 3/12"
    pub position: String,
    /// Set while a section transition is running.
    pub busy: bool,
}

impl StatusBar {
    pub fn hint(&self) -> &'static str {
        match self.mode {
            Mode::Deck => "Tab pages · ↑↓ wheel drag · q quit",
            Mode::Pages => "Tab deck · ←→ Home End click · q quit",
        }
    }

    pub fn left_text(&self) -> String {
        let mode = match self.mode {
            Mode::Deck => "deck",
            Mode::Pages => "pages",
        };
        let marker = if self.busy { " …" } else { "" };
        format!(" {} │ {} │ {}{}", self.document_name, mode, self.position, marker)
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint_width = u16::try_from(self.hint().width()).unwrap_or(u16::MAX);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width.saturating_add(1))])
                .areas(area);

        let title = Line::from(Span::styled(
            self.left_text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title), left);

        let hint = Line::from(Span::styled(self.hint(), Style::default().fg(Color::DarkGray)))
            .right_aligned();
        frame.render_widget(Paragraph::new(hint), right);
    }
}
