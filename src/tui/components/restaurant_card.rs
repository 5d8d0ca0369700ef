//! # RestaurantCard Component
//!
//! One card of the carousel: name, rating count and stars, price tier, address
//! and the "Reservar Mesa" action.
//!
//! Transient and stateless: created per card per frame by `Carousel`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::places::RestaurantSummary;
use crate::tui::components::format::{price_spans, rating_span, truncate_to_width};

/// Rows a card needs: borders, four content lines and up to three address lines.
pub const CARD_HEIGHT: u16 = 10;
/// Address lines shown before truncating.
const ADDRESS_LINES: usize = 3;

pub struct RestaurantCard<'a> {
    pub restaurant: &'a RestaurantSummary,
    /// Highlighted cards open on Enter.
    pub is_highlighted: bool,
}

impl<'a> RestaurantCard<'a> {
    pub fn new(restaurant: &'a RestaurantSummary, is_highlighted: bool) -> Self {
        Self {
            restaurant,
            is_highlighted,
        }
    }

    fn lines(&self, inner_width: usize) -> Vec<Line<'static>> {
        let r = self.restaurant;
        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("Avaliações: {} | ", r.user_ratings_total)),
                rating_span(r.rating),
            ]),
            Line::from(
                std::iter::once(Span::raw("Preço: "))
                    .chain(price_spans(r.price_indicator()))
                    .collect::<Vec<_>>(),
            ),
            Line::default(),
        ];

        let address = textwrap::wrap(&r.formatted_address, inner_width.max(1));
        for (i, part) in address.iter().take(ADDRESS_LINES).enumerate() {
            let mut text = part.to_string();
            if i + 1 == ADDRESS_LINES && address.len() > ADDRESS_LINES {
                text = truncate_to_width(&format!("{text} ..."), inner_width);
            }
            lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Gray))));
        }
        lines
    }
}

impl<'a> Widget for RestaurantCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_width = area.width.saturating_sub(4) as usize;
        let name = truncate_to_width(&self.restaurant.name, inner_width);

        let border_style = if self.is_highlighted {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let action_style = if self.is_highlighted {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };

        let block = Block::bordered()
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {name} "),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .title_bottom(Line::from(Span::styled(" Reservar Mesa ", action_style)).centered())
            .padding(Padding::horizontal(1));

        Paragraph::new(self.lines(inner_width))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::summary;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(restaurant: &RestaurantSummary) -> String {
        let backend = TestBackend::new(40, CARD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(RestaurantCard::new(restaurant, true), area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_card_shows_summary_fields() {
        let text = rendered(&summary("A"));
        assert!(text.contains("Restaurante A"));
        assert!(text.contains("Avaliações: 128"));
        assert!(text.contains("★ 4.2"));
        assert!(text.contains("Laranjeiras"));
        assert!(text.contains("Reservar Mesa"));
    }

    #[test]
    fn test_card_without_price_tier() {
        let mut restaurant = summary("A");
        restaurant.price_level = None;
        let text = rendered(&restaurant);
        assert!(text.contains("Não identificado"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_card_with_zero_price_tier() {
        let mut restaurant = summary("A");
        restaurant.price_level = Some(0);
        let text = rendered(&restaurant);
        assert!(text.contains("$$$$"));
        assert!(!text.contains("Não identificado"));
    }
}
