//! # ReservationForm Component
//!
//! The two reservation forms: the home form ("Faça uma reserva grátis") with a
//! free-text restaurant field, and the detail form ("Reserve uma Mesa") bound
//! to the restaurant on screen.
//!
//! Persistent state (`ReservationFormState`) lives in `TuiState`; the
//! transient `ReservationForm` wrapper renders it each frame.
//!
//! Keys: Tab/↓ next field, BackTab/↑ previous field, ←/→ cycle a choice,
//! Enter submits, Esc leaves the form.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::lookup::{PartySize, TimeSlot, party_sizes, time_slots};
use crate::core::reservation::{Reservation, parse_date};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Initially selected time: 20:00.
const DEFAULT_TIME_INDEX: usize = 40;
/// Initially selected party: 2 pessoas.
const DEFAULT_PARTY_INDEX: usize = 1;
/// `YYYY-MM-DD`
const DATE_INPUT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Home,
    /// Bound to the named restaurant.
    Detail { restaurant: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Time,
    Party,
    Restaurant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit(Reservation),
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct ReservationFormState {
    pub kind: FormKind,
    pub focused: FormField,
    pub date: String,
    pub time_index: usize,
    pub party_index: usize,
    pub restaurant: String,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
    slots: Vec<TimeSlot>,
    parties: Vec<PartySize>,
}

impl ReservationFormState {
    pub fn new(kind: FormKind) -> Self {
        let slots = time_slots();
        let parties = party_sizes();
        Self {
            kind,
            focused: FormField::Date,
            date: String::new(),
            time_index: DEFAULT_TIME_INDEX.min(slots.len().saturating_sub(1)),
            party_index: DEFAULT_PARTY_INDEX.min(parties.len().saturating_sub(1)),
            restaurant: String::new(),
            error: None,
            slots,
            parties,
        }
    }

    pub fn home() -> Self {
        Self::new(FormKind::Home)
    }

    pub fn for_restaurant(name: &str) -> Self {
        Self::new(FormKind::Detail {
            restaurant: name.to_string(),
        })
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Home => "Faça uma reserva grátis",
            FormKind::Detail { .. } => "Reserve uma Mesa",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.kind {
            FormKind::Home => "Vamos lá",
            FormKind::Detail { .. } => "Reservar",
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            FormKind::Home => &[
                FormField::Date,
                FormField::Time,
                FormField::Party,
                FormField::Restaurant,
            ],
            FormKind::Detail { .. } => &[FormField::Date, FormField::Time, FormField::Party],
        }
    }

    /// Rows needed to draw the form, borders included.
    pub fn height(&self) -> u16 {
        self.fields().len() as u16 + 5
    }

    pub fn selected_time(&self) -> Option<&TimeSlot> {
        self.slots.get(self.time_index)
    }

    pub fn selected_party(&self) -> Option<PartySize> {
        self.parties.get(self.party_index).copied()
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.focused = fields[next];
    }

    fn cycle(&mut self, forward: bool) {
        let (index, len) = match self.focused {
            FormField::Time => (&mut self.time_index, self.slots.len()),
            FormField::Party => (&mut self.party_index, self.parties.len()),
            FormField::Date | FormField::Restaurant => return,
        };
        if len == 0 {
            return;
        }
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    fn insert(&mut self, c: char) {
        match self.focused {
            FormField::Date => {
                if (c.is_ascii_digit() || c == '-') && self.date.len() < DATE_INPUT_LEN {
                    self.date.push(c);
                }
            }
            FormField::Restaurant => self.restaurant.push(c),
            FormField::Time | FormField::Party => {}
        }
    }

    fn backspace(&mut self) {
        match self.focused {
            FormField::Date => {
                self.date.pop();
            }
            FormField::Restaurant => {
                self.restaurant.pop();
            }
            FormField::Time | FormField::Party => {}
        }
    }

    /// Validates the form. On success the request is returned and the form
    /// keeps its values so it can be resubmitted.
    pub fn submit(&mut self) -> Option<Reservation> {
        let date = match parse_date(&self.date) {
            Ok(Some(date)) => date,
            Ok(None) => {
                self.error = Some("Escolha uma data (AAAA-MM-DD).".to_string());
                self.focused = FormField::Date;
                return None;
            }
            Err(e) => {
                log::debug!("Rejecting reservation date {:?}: {}", self.date, e);
                self.error = Some("Data inválida: use AAAA-MM-DD.".to_string());
                self.focused = FormField::Date;
                return None;
            }
        };
        let (Some(time), Some(party)) = (self.selected_time(), self.selected_party()) else {
            return None;
        };
        let restaurant = match &self.kind {
            FormKind::Home => {
                let typed = self.restaurant.trim();
                (!typed.is_empty()).then(|| typed.to_string())
            }
            FormKind::Detail { restaurant } => Some(restaurant.clone()),
        };
        let reservation = Reservation {
            restaurant,
            date,
            time: time.value.clone(),
            party,
        };
        self.error = None;
        Some(reservation)
    }
}

impl EventHandler for ReservationFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => Some(FormEvent::Dismiss),
            TuiEvent::Tab | TuiEvent::Down => {
                self.move_focus(true);
                None
            }
            TuiEvent::BackTab | TuiEvent::Up => {
                self.move_focus(false);
                None
            }
            TuiEvent::Left => {
                self.cycle(false);
                None
            }
            TuiEvent::Right => {
                self.cycle(true);
                None
            }
            TuiEvent::InputChar(c) => {
                self.insert(*c);
                None
            }
            TuiEvent::Backspace => {
                self.backspace();
                None
            }
            TuiEvent::Submit => self.submit().map(FormEvent::Submit),
            _ => None,
        }
    }
}

/// Transient wrapper that renders a `ReservationFormState`.
pub struct ReservationForm<'a> {
    pub state: &'a ReservationFormState,
    /// Whether keystrokes currently go to the form.
    pub is_active: bool,
}

impl<'a> ReservationForm<'a> {
    pub fn new(state: &'a ReservationFormState, is_active: bool) -> Self {
        Self { state, is_active }
    }

    fn field_line(&self, field: FormField) -> Line<'static> {
        let state = self.state;
        let focused = self.is_active && state.focused == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused { "_" } else { "" };

        let (label, value) = match field {
            FormField::Date => {
                let shown = if state.date.is_empty() && !focused {
                    "AAAA-MM-DD".to_string()
                } else {
                    format!("{}{cursor}", state.date)
                };
                ("Data", shown)
            }
            FormField::Time => {
                let slot = state
                    .selected_time()
                    .map(|s| s.label.clone())
                    .unwrap_or_default();
                ("Horário", format!("‹ {slot} ›"))
            }
            FormField::Party => {
                let party = state
                    .selected_party()
                    .map(PartySize::label)
                    .unwrap_or_default();
                ("Pessoas", format!("‹ {party} ›"))
            }
            FormField::Restaurant => (
                "Restaurante",
                format!("{}{cursor}", state.restaurant),
            ),
        };

        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{label:<12}"), label_style),
            Span::raw(value),
        ])
    }
}

impl<'a> Component for ReservationForm<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.state;
        let mut lines: Vec<Line> = state
            .fields()
            .iter()
            .map(|field| self.field_line(*field))
            .collect();

        lines.push(Line::default());
        let button_style = if self.is_active {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(Span::styled(
            format!(" {} ", state.submit_label()),
            button_style,
        )));
        if let Some(error) = &state.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let border_style = if self.is_active {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {} ", state.title()),
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(form: &mut ReservationFormState, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_home_form_submits_reservation() {
        let mut form = ReservationFormState::home();
        type_text(&mut form, "2026-10-16");
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Right);
        form.handle_event(&TuiEvent::Tab);
        form.handle_event(&TuiEvent::Left);
        form.handle_event(&TuiEvent::Tab);
        type_text(&mut form, "Aprazível");

        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(FormEvent::Submit(Reservation {
                restaurant: Some("Aprazível".to_string()),
                date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
                time: "20:30".to_string(),
                party: PartySize::Guests(1),
            }))
        );
        assert!(form.error.is_none());
    }

    #[test]
    fn test_blank_restaurant_is_none() {
        let mut form = ReservationFormState::home();
        type_text(&mut form, "2026-10-16");
        let reservation = form.submit().unwrap();
        assert_eq!(reservation.restaurant, None);
        assert_eq!(reservation.party, PartySize::Guests(2));
    }

    #[test]
    fn test_detail_form_is_bound_to_restaurant() {
        let mut form = ReservationFormState::for_restaurant("Aprazível");
        assert_eq!(form.fields().len(), 3);
        type_text(&mut form, "2026-12-31");
        let reservation = form.submit().unwrap();
        assert_eq!(reservation.restaurant.as_deref(), Some("Aprazível"));
    }

    #[test]
    fn test_missing_and_invalid_dates_are_rejected() {
        let mut form = ReservationFormState::home();
        form.focused = FormField::Time;
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(form.focused, FormField::Date);
        assert!(form.error.as_deref().unwrap().contains("Escolha uma data"));

        type_text(&mut form, "2026-02-30");
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert!(form.error.as_deref().unwrap().contains("Data inválida"));
    }

    #[test]
    fn test_date_field_only_accepts_date_characters() {
        let mut form = ReservationFormState::home();
        type_text(&mut form, "2026-1x0-16999");
        assert_eq!(form.date, "2026-10-16");
        form.handle_event(&TuiEvent::Backspace);
        assert_eq!(form.date, "2026-10-1");
    }

    #[test]
    fn test_party_select_wraps_to_festa() {
        let mut form = ReservationFormState::home();
        form.focused = FormField::Party;
        form.party_index = 0;
        form.handle_event(&TuiEvent::Left);
        assert_eq!(form.selected_party(), Some(PartySize::Party));
        form.handle_event(&TuiEvent::Right);
        assert_eq!(form.selected_party(), Some(PartySize::Guests(1)));
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut form = ReservationFormState::for_restaurant("X");
        form.handle_event(&TuiEvent::BackTab);
        assert_eq!(form.focused, FormField::Party);
        form.handle_event(&TuiEvent::Down);
        assert_eq!(form.focused, FormField::Date);
    }

    #[test]
    fn test_escape_dismisses() {
        let mut form = ReservationFormState::home();
        assert_eq!(form.handle_event(&TuiEvent::Escape), Some(FormEvent::Dismiss));
    }

    #[test]
    fn test_render_titles() {
        let home = ReservationFormState::home();
        let detail = ReservationFormState::for_restaurant("X");
        for (state, title, button) in [
            (&home, "Faça uma reserva grátis", "Vamos lá"),
            (&detail, "Reserve uma Mesa", "Reservar"),
        ] {
            let backend = TestBackend::new(50, state.height());
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|f| {
                    let area = f.area();
                    ReservationForm::new(state, true).render(f, area);
                })
                .unwrap();
            let text = terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect::<String>();
            assert!(text.contains(title));
            assert!(text.contains(button));
            assert!(text.contains("20:00"));
        }
    }
}
