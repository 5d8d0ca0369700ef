//! # DetailPage Component
//!
//! One restaurant: header, three tabs and the photo drawer.
//!
//! ```text
//! Aprazível
//! ┌ Visão Geral │ Avaliações │ Fotos ┐
//! │ Endereço: R. Aprazível, 62       │
//! │ Avaliação: ★ 4.5 (1520 avaliações)│
//! └──────────────────────────────────┘
//! ```
//!
//! Persistent state (`DetailPageState`) holds the selected tab, review scroll
//! and drawer; the transient `DetailPage` wrapper renders it over the core
//! `DetailState`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, Padding, Paragraph, Tabs, Wrap};

use crate::core::state::DetailState;
use crate::places::{ProxyClient, RestaurantDetail};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::format::{price_spans, rating_span};
use crate::tui::event::TuiEvent;

/// Photos shown inline on the Fotos tab; the rest go to the drawer.
pub const INLINE_PHOTOS: usize = 5;
/// Width requested for photo URLs.
pub const PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Reviews,
    Photos,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Overview, DetailTab::Reviews, DetailTab::Photos];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Overview => "Visão Geral",
            DetailTab::Reviews => "Avaliações",
            DetailTab::Photos => "Fotos",
        }
    }

    fn index(self) -> usize {
        match self {
            DetailTab::Overview => 0,
            DetailTab::Reviews => 1,
            DetailTab::Photos => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    /// Leave the detail page.
    Back,
    /// Move focus to the reservation form.
    Reserve,
}

#[derive(Debug, Clone, Default)]
pub struct DetailPageState {
    pub tab: DetailTab,
    pub review_scroll: u16,
    /// Furthest the reviews body can scroll, measured on the last render.
    pub review_max_scroll: u16,
    pub drawer_open: bool,
    pub drawer_scroll: usize,
    /// Photos of the loaded restaurant, kept for key handling.
    pub photo_count: usize,
}

impl DetailPageState {
    /// Photos beyond the inline ones, shown as "+N More".
    pub fn remaining_photos(&self) -> usize {
        self.photo_count.saturating_sub(INLINE_PHOTOS)
    }

    fn handle_drawer_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace | TuiEvent::InputChar('p') => {
                self.drawer_open = false;
            }
            TuiEvent::Up => self.drawer_scroll = self.drawer_scroll.saturating_sub(1),
            TuiEvent::Down => {
                if self.drawer_scroll + 1 < self.photo_count {
                    self.drawer_scroll += 1;
                }
            }
            _ => {}
        }
        None
    }
}

impl EventHandler for DetailPageState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        if self.drawer_open {
            return self.handle_drawer_event(event);
        }
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::Tab | TuiEvent::Right => {
                self.tab = self.tab.next();
                self.review_scroll = 0;
                None
            }
            TuiEvent::BackTab | TuiEvent::Left => {
                self.tab = self.tab.previous();
                self.review_scroll = 0;
                None
            }
            TuiEvent::Up => {
                self.review_scroll = self.review_scroll.saturating_sub(1);
                None
            }
            TuiEvent::Down => {
                if self.review_scroll < self.review_max_scroll {
                    self.review_scroll += 1;
                }
                None
            }
            TuiEvent::InputChar('p') => {
                if self.remaining_photos() > 0 {
                    self.tab = DetailTab::Photos;
                    self.drawer_open = true;
                    self.drawer_scroll = 0;
                }
                None
            }
            TuiEvent::InputChar('r') => Some(DetailEvent::Reserve),
            _ => None,
        }
    }
}

pub struct DetailPage<'a> {
    pub state: &'a mut DetailPageState,
    pub detail: &'a DetailState,
    /// Builds photo URLs that never carry the API key.
    pub photos: &'a ProxyClient,
}

impl<'a> DetailPage<'a> {
    pub fn new(
        state: &'a mut DetailPageState,
        detail: &'a DetailState,
        photos: &'a ProxyClient,
    ) -> Self {
        Self {
            state,
            detail,
            photos,
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(text.to_string()).centered().style(style), middle);
    }

    fn overview(restaurant: &RestaurantDetail) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::Gray);
        let not_informed = || Span::styled("Não informado", Style::default().fg(Color::DarkGray));
        vec![
            Line::from(Span::styled(
                format!("Sobre {}", restaurant.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Endereço: ", label),
                Span::raw(restaurant.formatted_address.clone()),
            ]),
            Line::from(vec![
                Span::styled("Avaliação: ", label),
                rating_span(restaurant.rating),
                Span::raw(format!(" ({} avaliações)", restaurant.user_ratings_total)),
            ]),
            Line::from(
                std::iter::once(Span::styled("Preço: ", label))
                    .chain(price_spans(restaurant.price_indicator()))
                    .collect::<Vec<_>>(),
            ),
            Line::from(vec![
                Span::styled("Telefone: ", label),
                restaurant
                    .formatted_phone_number
                    .clone()
                    .map(Span::raw)
                    .unwrap_or_else(not_informed),
            ]),
            Line::from(vec![
                Span::styled("Website: ", label),
                restaurant
                    .website
                    .clone()
                    .map(|url| Span::styled(url, Style::default().fg(Color::Blue)))
                    .unwrap_or_else(not_informed),
            ]),
        ]
    }

    fn reviews(restaurant: &RestaurantDetail) -> Vec<Line<'static>> {
        if restaurant.reviews.is_empty() {
            return vec![Line::from("Nenhuma avaliação disponível.")];
        }
        let mut lines = Vec::new();
        for review in &restaurant.reviews {
            lines.push(Line::from(vec![
                Span::styled(
                    review.author_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                rating_span(review.rating),
                Span::styled(
                    format!("  {}", review.relative_time_description),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                review.text.clone(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::default());
        }
        lines
    }

    fn photo_lines(&self, restaurant: &RestaurantDetail) -> Vec<Line<'static>> {
        if restaurant.photos.is_empty() {
            return vec![Line::from("Nenhuma foto disponível.")];
        }
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Fotos de {}", restaurant.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        for (i, photo) in restaurant.photos.iter().take(INLINE_PHOTOS).enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("Foto {}: ", i + 1), Style::default().fg(Color::Gray)),
                Span::raw(self.photos.photo_url(&photo.photo_reference, PHOTO_MAX_WIDTH)),
            ]));
        }
        let remaining = restaurant.photos.len().saturating_sub(INLINE_PHOTOS);
        if remaining > 0 {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("+{remaining} More"),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (p: ver todas)", Style::default().fg(Color::DarkGray)),
            ]));
        }
        lines
    }

    fn render_drawer(&mut self, frame: &mut Frame, area: Rect, restaurant: &RestaurantDetail) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let title = format!(" Fotos de {} ({}) ", restaurant.name, restaurant.photos.len());
        let block = Block::bordered()
            .title(Line::from(title).centered())
            .title_bottom(Line::from(" ↑/↓ rolar · Esc fechar ").centered())
            .border_style(Style::default().fg(Color::Red))
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = restaurant
            .photos
            .iter()
            .enumerate()
            .skip(self.state.drawer_scroll)
            .map(|(i, photo)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("Foto {}: ", i + 1), Style::default().fg(Color::Gray)),
                    Span::raw(self.photos.photo_url(&photo.photo_reference, PHOTO_MAX_WIDTH)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), overlay);
    }
}

impl<'a> Component for DetailPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let detail = self.detail;

        if detail.is_loading {
            let style = Style::default().fg(Color::DarkGray);
            Self::render_message(frame, area, "Carregando...", style);
            return;
        }
        if let Some(error) = &detail.error {
            Self::render_message(
                frame,
                area,
                &format!("Erro ao buscar os detalhes do restaurante: {error}"),
                Style::default().fg(Color::Red),
            );
            return;
        }
        let Some(restaurant) = &detail.detail else {
            Self::render_message(
                frame,
                area,
                "Detalhes do restaurante não encontrados.",
                Style::default().fg(Color::DarkGray),
            );
            return;
        };

        self.state.photo_count = restaurant.photos.len();

        let [header_area, tabs_area, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(
            Line::from(Span::styled(
                restaurant.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            header_area,
        );

        let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.title()))
            .select(self.state.tab.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .divider(" │ ");
        frame.render_widget(tabs, tabs_area);

        let lines = match self.state.tab {
            DetailTab::Overview => Self::overview(restaurant),
            DetailTab::Reviews => Self::reviews(restaurant),
            DetailTab::Photos => self.photo_lines(restaurant),
        };
        let scroll = if self.state.tab == DetailTab::Reviews {
            // Borders take two rows; borders plus padding take four columns.
            let content = wrapped_height(&lines, body_area.width.saturating_sub(4));
            let viewport = body_area.height.saturating_sub(2);
            self.state.review_max_scroll = content.saturating_sub(viewport);
            self.state.review_scroll = self.state.review_scroll.min(self.state.review_max_scroll);
            self.state.review_scroll
        } else {
            0
        };
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(Color::DarkGray))
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(body, body_area);

        if self.state.drawer_open {
            self.render_drawer(frame, area, restaurant);
        }
    }
}

/// Rows `lines` take once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines.iter().map(|line| line.width().div_ceil(width).max(1)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::{Photo, Review};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn restaurant(photos: usize, reviews: Vec<Review>) -> RestaurantDetail {
        RestaurantDetail {
            place_id: Some("p1".to_string()),
            name: "Aprazível".to_string(),
            rating: 4.5,
            price_level: Some(3),
            types: vec!["restaurant".to_string()],
            formatted_address: "R. Aprazível, 62 - Santa Teresa".to_string(),
            photos: (0..photos)
                .map(|i| Photo {
                    photo_reference: format!("ref{i}"),
                })
                .collect(),
            user_ratings_total: 1520,
            formatted_phone_number: Some("(21) 2508-9174".to_string()),
            website: None,
            reviews,
        }
    }

    fn loaded(detail: RestaurantDetail) -> DetailState {
        let mut state = DetailState::new("p1".to_string());
        state.is_loading = false;
        state.detail = Some(detail);
        state
    }

    fn rendered(page_state: &mut DetailPageState, detail: &DetailState) -> String {
        let proxy = ProxyClient::new("http://127.0.0.1:3000".to_string());
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                DetailPage::new(page_state, detail, &proxy).render(f, area);
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
    fn test_loading_state() {
        let detail = DetailState::new("p1".to_string());
        let text = rendered(&mut DetailPageState::default(), &detail);
        assert!(text.contains("Carregando..."));
    }

    #[test]
    fn test_not_found_state() {
        let mut detail = DetailState::new("p1".to_string());
        detail.is_loading = false;
        let text = rendered(&mut DetailPageState::default(), &detail);
        assert!(text.contains("Detalhes do restaurante não encontrados."));
    }

    #[test]
    fn test_overview_tab() {
        let detail = loaded(restaurant(0, vec![]));
        let text = rendered(&mut DetailPageState::default(), &detail);
        assert!(text.contains("Visão Geral"));
        assert!(text.contains("Santa Teresa"));
        assert!(text.contains("★ 4.5"));
        assert!(text.contains("(1520 avaliações)"));
        assert!(text.contains("(21) 2508-9174"));
        assert!(text.contains("Não informado"));
    }

    #[test]
    fn test_reviews_tab_empty() {
        let detail = loaded(restaurant(0, vec![]));
        let mut state = DetailPageState {
            tab: DetailTab::Reviews,
            ..Default::default()
        };
        let text = rendered(&mut state, &detail);
        assert!(text.contains("Nenhuma avaliação disponível."));
    }

    #[test]
    fn test_reviews_tab_lists_reviews() {
        let review = Review {
            author_name: "Ana".to_string(),
            profile_photo_url: String::new(),
            rating: 5.0,
            relative_time_description: "há uma semana".to_string(),
            text: "Vista incrível.".to_string(),
        };
        let detail = loaded(restaurant(0, vec![review]));
        let mut state = DetailPageState {
            tab: DetailTab::Reviews,
            ..Default::default()
        };
        let text = rendered(&mut state, &detail);
        assert!(text.contains("Ana"));
        assert!(text.contains("há uma semana"));
        assert!(text.contains("Vista incrível."));
    }

    #[test]
    fn test_review_scroll_stops_at_last_line() {
        let reviews = (0..20)
            .map(|i| Review {
                author_name: format!("Autor {i}"),
                profile_photo_url: String::new(),
                rating: 4.0,
                relative_time_description: "ontem".to_string(),
                text: "Bom.".to_string(),
            })
            .collect();
        let detail = loaded(restaurant(0, reviews));
        let mut state = DetailPageState {
            tab: DetailTab::Reviews,
            ..Default::default()
        };
        rendered(&mut state, &detail);
        // 60 lines in a 26-row body
        assert_eq!(state.review_max_scroll, 34);

        for _ in 0..100 {
            state.handle_event(&TuiEvent::Down);
        }
        assert_eq!(state.review_scroll, 34);
        let text = rendered(&mut state, &detail);
        assert!(text.contains("Autor 19"));
        assert!(!text.contains("Autor 0 "));
    }

    #[test]
    fn test_short_reviews_do_not_scroll() {
        let detail = loaded(restaurant(0, vec![]));
        let mut state = DetailPageState {
            tab: DetailTab::Reviews,
            ..Default::default()
        };
        rendered(&mut state, &detail);
        state.handle_event(&TuiEvent::Down);
        assert_eq!(state.review_scroll, 0);
    }

    #[test]
    fn test_photos_tab_shows_five_and_more() {
        let detail = loaded(restaurant(8, vec![]));
        let mut state = DetailPageState {
            tab: DetailTab::Photos,
            ..Default::default()
        };
        let text = rendered(&mut state, &detail);
        assert!(text.contains("/api/photo/ref4?maxwidth=400"));
        assert!(!text.contains("ref5"));
        assert!(text.contains("+3 More"));
        assert!(!text.contains("key="));
    }

    #[test]
    fn test_drawer_lists_all_photos() {
        let detail = loaded(restaurant(8, vec![]));
        let mut state = DetailPageState::default();
        // First render records the photo count.
        rendered(&mut state, &detail);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('p')), None);
        assert!(state.drawer_open);

        let text = rendered(&mut state, &detail);
        assert!(text.contains("ref7"));
        assert!(text.contains("Esc fechar"));

        state.handle_event(&TuiEvent::Escape);
        assert!(!state.drawer_open);
    }

    #[test]
    fn test_drawer_needs_more_than_inline_photos() {
        let mut state = DetailPageState {
            photo_count: INLINE_PHOTOS,
            ..Default::default()
        };
        state.handle_event(&TuiEvent::InputChar('p'));
        assert!(!state.drawer_open);

        let mut empty = DetailPageState::default();
        empty.handle_event(&TuiEvent::InputChar('p'));
        assert!(!empty.drawer_open);
    }

    #[test]
    fn test_tab_navigation_and_back() {
        let mut state = DetailPageState::default();
        state.handle_event(&TuiEvent::Tab);
        assert_eq!(state.tab, DetailTab::Reviews);
        state.handle_event(&TuiEvent::Left);
        state.handle_event(&TuiEvent::Left);
        assert_eq!(state.tab, DetailTab::Photos);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('r')), Some(DetailEvent::Reserve));
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(DetailEvent::Back));
    }
}
