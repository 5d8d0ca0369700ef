//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (page in flight, carousel mid-scroll): draws every ~33ms
//!   and feeds `Action::Tick` to the reducer.
//! - **Idle**: sleeps up to 500ms, only redraws on events or results.
//!
//! ## Fetch lifetime
//!
//! Fetches and settle timers run as tokio tasks whose abort handles are held
//! here. Whenever the core bumps its mount (navigation), every handle of the
//! old mount is aborted; anything that still slips through is dropped by the
//! reducer's mount check.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::layout::Direction;
use crate::core::state::{App, Screen};
use crate::places::{PageToken, ProxyClient, RestaurantSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailEvent, DetailPageState, FormEvent, ReservationFormState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_FRAME: Duration = Duration::from_millis(33);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Carousel on the listing, tabs on the detail page.
    Browse,
    /// The reservation form of the mounted page.
    Form,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    /// Card Enter opens, as an index into the listing results.
    pub highlighted: Option<usize>,
    // Persistent component states
    pub home_form: ReservationFormState,
    pub detail_page: DetailPageState,
    /// Created once the detail has loaded, bound to its restaurant.
    pub detail_form: Option<ReservationFormState>,
    /// Mount the per-view state above belongs to.
    pub synced_mount: u64,
    /// Builds photo URLs for the detail page.
    pub proxy: Arc<ProxyClient>,
}

impl TuiState {
    pub fn new(proxy_url: String) -> Self {
        Self::with_proxy(Arc::new(ProxyClient::new(proxy_url)))
    }

    pub fn with_proxy(proxy: Arc<ProxyClient>) -> Self {
        Self {
            focus: Focus::Browse,
            highlighted: None,
            home_form: ReservationFormState::home(),
            detail_page: DetailPageState::default(),
            detail_form: None,
            synced_mount: 0,
            proxy,
        }
    }

    /// Aligns presentation state with the mounted view. Per-view state is
    /// reset whenever the core mounts a new view.
    pub fn sync(&mut self, app: &App) {
        if app.mount != self.synced_mount {
            debug!("TUI state reset for mount {}", app.mount);
            self.synced_mount = app.mount;
            self.focus = Focus::Browse;
            self.highlighted = None;
            self.detail_page = DetailPageState::default();
            self.detail_form = None;
        }

        match &app.screen {
            Screen::Listing(listing) => {
                if listing.results.is_empty() {
                    self.highlighted = None;
                    return;
                }
                let card = listing.scroll.card_width() as usize;
                let first = listing.scroll.target as usize / card;
                let last = (first + listing.visible_cards).min(listing.results.len());
                let in_view = first.min(listing.results.len() - 1)..last.max(first + 1);
                // Keep the highlight on a card the user can see.
                match self.highlighted {
                    Some(i) if in_view.contains(&i) && i < listing.results.len() => {}
                    _ => self.highlighted = Some(in_view.start),
                }
            }
            Screen::Detail(detail) => {
                if self.detail_form.is_none()
                    && let Some(found) = &detail.detail
                {
                    self.detail_form = Some(ReservationFormState::for_restaurant(&found.name));
                }
            }
        }
    }

    /// Moves the highlight within the cards in view, wrapping around.
    fn cycle_highlight(&mut self, app: &App, forward: bool) {
        let Some(listing) = app.listing() else {
            return;
        };
        if listing.results.is_empty() {
            return;
        }
        let card = listing.scroll.card_width() as usize;
        let first = (listing.scroll.target as usize / card).min(listing.results.len() - 1);
        let last = (first + listing.visible_cards).min(listing.results.len());
        let span = (last - first).max(1);
        let current = self.highlighted.unwrap_or(first).clamp(first, last - 1) - first;
        let next = if forward {
            (current + 1) % span
        } else {
            (current + span - 1) % span
        };
        self.highlighted = Some(first + next);
    }
}

/// Translates one input event into at most one core action, updating
/// presentation state on the way.
pub fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize(width, _) => return Some(Action::Resize(*width)),
        _ => {}
    }

    if tui.focus == Focus::Form {
        let form = match &app.screen {
            Screen::Listing(_) => Some(&mut tui.home_form),
            Screen::Detail(_) => tui.detail_form.as_mut(),
        };
        let Some(form) = form else {
            tui.focus = Focus::Browse;
            return None;
        };
        return match form.handle_event(event)? {
            FormEvent::Submit(reservation) => {
                tui.focus = Focus::Browse;
                Some(Action::SubmitReservation(reservation))
            }
            FormEvent::Dismiss => {
                tui.focus = Focus::Browse;
                None
            }
        };
    }

    match &app.screen {
        Screen::Listing(listing) => match event {
            TuiEvent::Left => Some(Action::Advance(Direction::Backward)),
            TuiEvent::Right => Some(Action::Advance(Direction::Forward)),
            TuiEvent::Tab => {
                tui.cycle_highlight(app, true);
                None
            }
            TuiEvent::BackTab => {
                tui.cycle_highlight(app, false);
                None
            }
            TuiEvent::Submit => tui
                .highlighted
                .and_then(|i| listing.results.get(i))
                .map(|r| Action::OpenDetail(r.place_id.clone())),
            TuiEvent::InputChar('m') => Some(Action::LoadNextPage),
            TuiEvent::InputChar('r') => {
                tui.focus = Focus::Form;
                None
            }
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
            _ => None,
        },
        Screen::Detail(_) => {
            if !tui.detail_page.drawer_open && matches!(event, TuiEvent::InputChar('q')) {
                return Some(Action::Quit);
            }
            match tui.detail_page.handle_event(event)? {
                DetailEvent::Back => Some(Action::ShowListing),
                DetailEvent::Reserve => {
                    if tui.detail_form.is_some() {
                        tui.focus = Focus::Form;
                    }
                    None
                }
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let proxy = Arc::new(ProxyClient::new(config.proxy_url.clone()));
    info!("Browsing restaurants through {}", config.proxy_url);

    let mut terminal = ratatui::init();
    let width = terminal.size().map(|size| size.width).unwrap_or(80);

    let source: Arc<dyn RestaurantSource> = proxy.clone();
    let mut app = App::new(source, width);
    let mut tui = TuiState::with_proxy(proxy);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Fetch and timer tasks of the mounted view
    let mut active_abort_handles: Vec<tokio::task::AbortHandle> = Vec::new();
    let mut handles_mount = app.mount;

    let mut should_quit = dispatch(
        &mut app,
        Action::ShowListing,
        &tx,
        &mut active_abort_handles,
        &mut handles_mount,
    );
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        let animating = app.is_animating();
        if animating {
            should_quit |= dispatch(
                &mut app,
                Action::Tick,
                &tx,
                &mut active_abort_handles,
                &mut handles_mount,
            );
            needs_redraw = true;
        }

        tui.sync(&app);
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                ratatui::restore();
                return Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync(&app);
            if let Some(action) = handle_event(&app, &mut tui, &event) {
                should_quit |= dispatch(
                    &mut app,
                    action,
                    &tx,
                    &mut active_abort_handles,
                    &mut handles_mount,
                );
            }
            if should_quit {
                break;
            }
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(
                &mut app,
                action,
                &tx,
                &mut active_abort_handles,
                &mut handles_mount,
            );
        }
    }

    for handle in active_abort_handles.drain(..) {
        handle.abort();
    }
    info!("Mesa browser shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs one action through the reducer and performs its effect.
/// Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<Action>,
    handles: &mut Vec<tokio::task::AbortHandle>,
    handles_mount: &mut u64,
) -> bool {
    let effect = update(app, action);

    if app.mount != *handles_mount {
        if !handles.is_empty() {
            debug!(
                "Aborting {} task(s) of torn-down mount {}",
                handles.len(),
                handles_mount
            );
        }
        for handle in handles.drain(..) {
            handle.abort();
        }
        *handles_mount = app.mount;
    }
    handles.retain(|handle| !handle.is_finished());

    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::FetchPage(token) => {
            handles.push(spawn_page_fetch(app, token, tx.clone()));
        }
        Effect::FetchDetail(place_id) => {
            handles.push(spawn_detail_fetch(app, place_id, tx.clone()));
        }
        Effect::ScheduleSettle(delay) => {
            handles.push(schedule_settle(app.mount, delay, tx.clone()));
        }
    }
    false
}

fn spawn_page_fetch(
    app: &App,
    token: Option<PageToken>,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let source = app.source.clone();
    let mount = app.mount;
    info!(
        "Fetching restaurants from {} (pagetoken={})",
        source.name(),
        token.as_ref().map(PageToken::as_str).unwrap_or("none")
    );
    let handle = tokio::spawn(async move {
        let action = match source.search(token.as_ref()).await {
            Ok(page) => Action::PageLoaded { mount, page },
            Err(e) => Action::PageFailed {
                mount,
                message: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send page result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_detail_fetch(
    app: &App,
    place_id: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let source = app.source.clone();
    let mount = app.mount;
    info!("Fetching details for {} from {}", place_id, source.name());
    let handle = tokio::spawn(async move {
        let action = match source.detail(&place_id).await {
            Ok(envelope) => Action::DetailLoaded { mount, envelope },
            Err(e) => Action::DetailFailed {
                mount,
                message: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send detail result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn schedule_settle(
    mount: u64,
    delay: Duration,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::ScrollSettled { mount }).is_err() {
            debug!("Scroll settle dropped: receiver gone");
        }
    });
    handle.abort_handle()
}
