use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::restaurant_card::CARD_HEIGHT;
use crate::tui::components::{Carousel, DetailPage, ReservationForm, TitleBar};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Heading above the carousel.
pub const LISTING_HEADING: &str = "Opções do Rio de Janeiro";
/// Detail pages narrower than this stack the form under the tabs.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;
/// Width of the reservation form beside the detail tabs.
const DETAIL_FORM_WIDTH: u16 = 44;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Fill, Length};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Fill(1), Length(1)]).areas(frame.area());

    let page_title = match &app.screen {
        Screen::Listing(_) => LISTING_HEADING.to_string(),
        Screen::Detail(detail) => detail
            .detail
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "Restaurante".to_string()),
    };
    TitleBar::new(page_title, app.status_message.clone()).render(frame, title_area);

    match &app.screen {
        Screen::Listing(listing) => {
            let form_height = tui.home_form.height();
            let [form_area, heading_area, carousel_area, _] = Layout::vertical([
                Length(form_height),
                Length(1),
                Length(CARD_HEIGHT + 1),
                Fill(1),
            ])
            .areas(main_area);

            let form_active = tui.focus == Focus::Form;
            ReservationForm::new(&tui.home_form, form_active).render(frame, form_area);
            frame.render_widget(
                Line::from(Span::styled(
                    LISTING_HEADING,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                heading_area,
            );
            Carousel::new(listing, tui.highlighted).render(frame, carousel_area);
        }
        Screen::Detail(detail) => {
            let (page_area, form_area) = split_detail(main_area, tui);
            DetailPage::new(&mut tui.detail_page, detail, &tui.proxy).render(frame, page_area);
            if let (Some(form), Some(area)) = (&tui.detail_form, form_area) {
                ReservationForm::new(form, tui.focus == Focus::Form).render(frame, area);
            }
        }
    }

    frame.render_widget(help_line(app, tui), help_area);
}

fn split_detail(area: Rect, tui: &TuiState) -> (Rect, Option<Rect>) {
    let Some(form) = &tui.detail_form else {
        return (area, None);
    };
    if area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        let [page, form_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(DETAIL_FORM_WIDTH)])
                .areas(area);
        (page, Some(form_area))
    } else {
        let [page, form_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(form.height())]).areas(area);
        (page, Some(form_area))
    }
}

fn help_line(app: &App, tui: &TuiState) -> Line<'static> {
    let text = match (&app.screen, tui.focus) {
        (_, Focus::Form) => "Tab/↑/↓ campos · ←/→ opções · Enter reservar · Esc voltar",
        (Screen::Listing(_), Focus::Browse) => {
            "←/→ rolar · Tab escolher · Enter abrir · m mais · r reservar · q sair"
        }
        (Screen::Detail(_), Focus::Browse) if tui.detail_page.drawer_open => {
            "↑/↓ rolar · Esc fechar"
        }
        (Screen::Detail(_), Focus::Browse) => {
            "Tab/←/→ abas · ↑/↓ rolar · p fotos · r reservar · Esc voltar · q sair"
        }
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
