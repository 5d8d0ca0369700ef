//! # Carousel Component
//!
//! Horizontal strip of restaurant cards over the listing state.
//!
//! Transient wrapper: the scroll position lives in `ListingState.scroll`
//! (core), so the reducer decides where the strip is and this component only
//! draws it.
//!
//! ```text
//! ┌ A ─────┐┌ B ─────┐┌ C ─────┐
//! │        ││        ││        │
//! └Reservar┘└Reservar┘└Reservar┘
//! ‹  24 restaurantes · Carregando...  ›
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::ListingState;
use crate::tui::component::Component;
use crate::tui::components::restaurant_card::{CARD_HEIGHT, RestaurantCard};

pub struct Carousel<'a> {
    pub listing: &'a ListingState,
    /// Index into `listing.results` of the card Enter opens.
    pub highlighted: Option<usize>,
}

impl<'a> Carousel<'a> {
    pub fn new(listing: &'a ListingState, highlighted: Option<usize>) -> Self {
        Self {
            listing,
            highlighted,
        }
    }

    /// Range of cards that intersect the viewport at the current offset.
    fn visible_range(&self) -> std::ops::Range<usize> {
        let scroll = &self.listing.scroll;
        let card = scroll.card_width();
        let start = (scroll.offset / card) as usize;
        let end = (scroll.offset + scroll.viewport).div_ceil(card) as usize;
        start.min(self.listing.results.len())..end.min(self.listing.results.len())
    }

    fn indicator(symbol: &'static str, enabled: bool) -> Span<'static> {
        if enabled {
            Span::styled(
                symbol,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(symbol, Style::default().fg(Color::DarkGray))
        }
    }

    fn status_line(&self) -> Line<'static> {
        let listing = self.listing;
        let mut spans = vec![
            Self::indicator("‹", listing.can_scroll_backward),
            Span::raw(format!("  {} restaurantes", listing.results.len())),
        ];
        if listing.is_loading {
            spans.push(Span::styled(
                " · Carregando...",
                Style::default().fg(Color::Yellow),
            ));
        } else if let Some(error) = &listing.error {
            spans.push(Span::styled(
                format!(" · Erro ao buscar restaurantes: {error}"),
                Style::default().fg(Color::Red),
            ));
        } else if listing.has_more() {
            spans.push(Span::styled(
                " · m: carregar mais",
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::raw("  "));
        spans.push(Self::indicator("›", listing.can_scroll_forward));
        Line::from(spans)
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let text = if self.listing.is_loading {
            "Carregando..."
        } else if self.listing.error.is_some() {
            "Não foi possível carregar os restaurantes."
        } else {
            "Nenhum restaurante encontrado."
        };
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(text)
                .centered()
                .style(Style::default().fg(Color::DarkGray)),
            middle,
        );
    }
}

impl<'a> Component for Carousel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [cards_area, status_area] =
            Layout::vertical([Constraint::Length(CARD_HEIGHT), Constraint::Length(1)])
                .areas(area);

        if self.listing.results.is_empty() {
            self.render_empty(frame, cards_area);
        } else {
            let scroll = &self.listing.scroll;
            let card = scroll.card_width().min(u16::MAX as u32) as u16;
            let content_width = scroll
                .content
                .max(cards_area.width as u32)
                .min(u16::MAX as u32) as u16;

            let mut scroll_view = ScrollView::new(Size::new(content_width, CARD_HEIGHT))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

            for i in self.visible_range() {
                let x = (i as u32 * card as u32).min(u16::MAX as u32) as u16;
                let rect = Rect::new(x, 0, card, CARD_HEIGHT);
                let restaurant = &self.listing.results[i];
                scroll_view.render_widget(
                    RestaurantCard::new(restaurant, self.highlighted == Some(i)),
                    rect,
                );
            }

            let mut state = ScrollViewState::default();
            state.set_offset(Position {
                x: scroll.offset.min(u16::MAX as u32) as u16,
                y: 0,
            });
            frame.render_stateful_widget(scroll_view, cards_area, &mut state);
        }

        frame.render_widget(self.status_line().centered(), status_area);
    }
}
