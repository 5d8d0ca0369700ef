//! # TitleBar Component
//!
//! Top status bar: which page is mounted and the latest status message.
//!
//! Stateless: it receives everything as props and renders a single line.
//!
//! 1. **Status message**: `"Mesa | Opções do Rio de Janeiro | Carregando..."`
//! 2. **Default**: `"Mesa | Opções do Rio de Janeiro"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// What the mounted page shows (e.g. "Opções do Rio de Janeiro")
    pub page_title: String,
    /// Status message (e.g. "Carregando...", "24 restaurantes")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(page_title: String, status_message: String) -> Self {
        Self {
            page_title,
            status_message,
        }
    }

    fn text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Mesa | {}", self.page_title)
        } else {
            format!("Mesa | {} | {}", self.page_title, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
