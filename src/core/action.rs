//! # Actions
//!
//! Everything that can happen in Mesa becomes an `Action`.
//! User presses →? That's `Action::Advance(Direction::Forward)`.
//! A page arrives? That's `Action::PageLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state and returns the `Effect` the caller must perform.
//! No I/O here. Fetches, timers and quitting happen elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info, warn};

use crate::core::layout::{Direction, visible_card_count};
use crate::core::reservation::Reservation;
use crate::core::state::{App, Cursor, DetailState, ListingState, SCROLL_SETTLE_DELAY, Screen};
use crate::places::{DetailEnvelope, PageToken, SearchPage};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    /// Mount a fresh listing (start-up, or back from a detail page).
    ShowListing,
    LoadNextPage,
    PageLoaded { mount: u64, page: SearchPage },
    PageFailed { mount: u64, message: String },
    /// Layout signal: the viewport is now this many columns wide.
    Resize(u16),
    Advance(Direction),
    /// One animation frame.
    Tick,
    ScrollSettled { mount: u64 },
    OpenDetail(String),
    DetailLoaded { mount: u64, envelope: DetailEnvelope },
    DetailFailed { mount: u64, message: String },
    SubmitReservation(Reservation),
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchPage(Option<PageToken>),
    FetchDetail(String),
    /// Send `ScrollSettled` for the current mount after this delay.
    ScheduleSettle(Duration),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::ShowListing => {
            app.mount += 1;
            app.screen = Screen::Listing(ListingState::new(app.viewport_width));
            info!("Listing mounted (mount={})", app.mount);
            load_next_page(app)
        }

        Action::LoadNextPage => load_next_page(app),

        Action::PageLoaded { mount, page } => {
            if mount != app.mount {
                debug!("Dropping page for torn-down mount {}", mount);
                return Effect::None;
            }
            let Screen::Listing(listing) = &mut app.screen else {
                return Effect::None;
            };
            info!(
                "Page loaded: {} results, more={}",
                page.results.len(),
                page.next_page_token.is_some()
            );
            listing.results.extend(page.results);
            listing.cursor = Cursor::from_token(page.next_page_token);
            listing.is_loading = false;
            listing.error = None;
            listing.scroll.set_cards(listing.results.len());
            listing.refresh_scroll_flags();
            app.status_message = format!("{} restaurantes", listing.results.len());
            Effect::None
        }

        Action::PageFailed { mount, message } => {
            if mount != app.mount {
                debug!("Dropping failure for torn-down mount {}", mount);
                return Effect::None;
            }
            let Screen::Listing(listing) = &mut app.screen else {
                return Effect::None;
            };
            warn!("Erro ao buscar restaurantes: {}", message);
            listing.is_loading = false;
            listing.error = Some(message);
            app.status_message = "Erro ao buscar restaurantes".to_string();
            Effect::None
        }

        Action::Resize(width) => {
            app.viewport_width = width;
            if let Screen::Listing(listing) = &mut app.screen {
                listing.visible_cards = visible_card_count(width);
                listing
                    .scroll
                    .remeasure(width, listing.visible_cards, listing.results.len());
                listing.refresh_scroll_flags();
                debug!(
                    "Resized to {} columns: {} cards per view",
                    width, listing.visible_cards
                );
            }
            Effect::None
        }

        Action::Advance(direction) => {
            let Screen::Listing(listing) = &mut app.screen else {
                return Effect::None;
            };
            if listing.scroll.advance(direction, listing.visible_cards) {
                debug!(
                    "Advancing {:?} to offset {}",
                    direction, listing.scroll.target
                );
                Effect::ScheduleSettle(SCROLL_SETTLE_DELAY)
            } else if direction == Direction::Forward {
                // Nothing left to scroll to: the next page is the way forward.
                load_next_page(app)
            } else {
                Effect::None
            }
        }

        Action::Tick => {
            if let Screen::Listing(listing) = &mut app.screen {
                listing.scroll.step();
            }
            Effect::None
        }

        Action::ScrollSettled { mount } => {
            if mount != app.mount {
                return Effect::None;
            }
            if let Screen::Listing(listing) = &mut app.screen {
                listing.scroll.settle();
                listing.refresh_scroll_flags();
            }
            Effect::None
        }

        Action::OpenDetail(place_id) => {
            if place_id.trim().is_empty() {
                warn!("Refusing to open detail without a place id");
                return Effect::None;
            }
            app.mount += 1;
            info!("Detail mounted for {} (mount={})", place_id, app.mount);
            app.screen = Screen::Detail(DetailState::new(place_id.clone()));
            app.status_message = "Carregando...".to_string();
            Effect::FetchDetail(place_id)
        }

        Action::DetailLoaded { mount, envelope } => {
            if mount != app.mount {
                debug!("Dropping detail for torn-down mount {}", mount);
                return Effect::None;
            }
            let Screen::Detail(detail) = &mut app.screen else {
                return Effect::None;
            };
            detail.is_loading = false;
            if envelope.result.is_none() {
                warn!(
                    "Detail lookup for {} came back without a result (status={:?}, message={:?})",
                    detail.place_id, envelope.status, envelope.error_message
                );
            }
            detail.detail = envelope.into_detail();
            app.status_message = match &detail.detail {
                Some(found) => found.name.clone(),
                None => "Detalhes do restaurante não encontrados.".to_string(),
            };
            Effect::None
        }

        Action::DetailFailed { mount, message } => {
            if mount != app.mount {
                return Effect::None;
            }
            let Screen::Detail(detail) = &mut app.screen else {
                return Effect::None;
            };
            warn!("Erro ao buscar detalhes do restaurante: {}", message);
            detail.is_loading = false;
            detail.error = Some(message);
            app.status_message = "Erro ao buscar detalhes do restaurante".to_string();
            Effect::None
        }

        Action::SubmitReservation(reservation) => {
            info!("Reservation requested: {:?}", reservation);
            app.status_message = format!("Reserva solicitada: {}", reservation.summary());
            Effect::None
        }
    }
}

/// Starts the next page fetch unless one is in flight or the listing is exhausted.
fn load_next_page(app: &mut App) -> Effect {
    let Screen::Listing(listing) = &mut app.screen else {
        return Effect::None;
    };
    if listing.is_loading {
        debug!("Page load already in flight, ignoring");
        return Effect::None;
    }
    let token = match &listing.cursor {
        Cursor::Start => None,
        Cursor::Continue(token) => Some(token.clone()),
        Cursor::Exhausted => {
            debug!("No more pages to load");
            return Effect::None;
        }
    };
    listing.is_loading = true;
    app.status_message = "Carregando...".to_string();
    Effect::FetchPage(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::RestaurantDetail;
    use crate::test_support::{summary, test_app};

    fn page(ids: &[&str], token: Option<&str>) -> SearchPage {
        SearchPage {
            results: ids.iter().map(|id| summary(id)).collect(),
            next_page_token: token.map(|t| PageToken(t.to_string())),
        }
    }

    fn loaded(mount: u64, ids: &[&str], token: Option<&str>) -> Action {
        Action::PageLoaded {
            mount,
            page: page(ids, token),
        }
    }

    fn failed(mount: u64, message: &str) -> Action {
        Action::PageFailed {
            mount,
            message: message.to_string(),
        }
    }

    fn ids(app: &App) -> Vec<String> {
        app.listing()
            .unwrap()
            .results
            .iter()
            .map(|r| r.place_id.clone())
            .collect()
    }

    #[test]
    fn test_show_listing_starts_first_page() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ShowListing), Effect::FetchPage(None));
        assert_eq!(app.mount, 1);
        assert!(app.listing().unwrap().is_loading);
    }

    #[test]
    fn test_pages_accumulate_in_order_then_exhaust() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A", "B"], Some("T1")));
        assert_eq!(
            update(&mut app, Action::LoadNextPage),
            Effect::FetchPage(Some(PageToken("T1".to_string())))
        );
        update(&mut app, loaded(1, &["C"], None));

        assert_eq!(ids(&app), vec!["A", "B", "C"]);
        assert_eq!(app.listing().unwrap().cursor, Cursor::Exhausted);
        assert_eq!(update(&mut app, Action::LoadNextPage), Effect::None);
        assert!(!app.listing().unwrap().is_loading);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A"], Some("T1")));
        update(&mut app, Action::LoadNextPage);
        update(&mut app, loaded(1, &["A"], None));
        assert_eq!(ids(&app), vec!["A", "A"]);
    }

    #[test]
    fn test_in_flight_guard_blocks_overlapping_loads() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ShowListing), Effect::FetchPage(None));
        assert_eq!(update(&mut app, Action::LoadNextPage), Effect::None);
        assert_eq!(update(&mut app, Action::LoadNextPage), Effect::None);
    }

    #[test]
    fn test_failure_keeps_results_and_clears_loading() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A", "B"], Some("T1")));
        update(&mut app, Action::LoadNextPage);
        update(&mut app, failed(1, "network error: boom"));

        let listing = app.listing().unwrap();
        assert_eq!(ids(&app), vec!["A", "B"]);
        assert!(!listing.is_loading);
        assert_eq!(listing.error.as_deref(), Some("network error: boom"));
        assert_eq!(listing.cursor, Cursor::Continue(PageToken("T1".to_string())));
    }

    #[test]
    fn test_retry_after_failure_reuses_token() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A"], Some("T1")));
        update(&mut app, Action::LoadNextPage);
        update(&mut app, failed(1, "x"));
        assert_eq!(
            update(&mut app, Action::LoadNextPage),
            Effect::FetchPage(Some(PageToken("T1".to_string())))
        );
    }

    #[test]
    fn test_rejected_continuation_stays_retryable() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A", "B"], Some("T1")));
        assert_eq!(
            update(&mut app, Action::LoadNextPage),
            Effect::FetchPage(Some(PageToken("T1".to_string())))
        );
        // The proxy answers 500 when the upstream rejects the token.
        update(&mut app, failed(1, "API error (HTTP 500): Erro ao buscar restaurantes"));

        let listing = app.listing().unwrap();
        assert_eq!(listing.cursor, Cursor::Continue(PageToken("T1".to_string())));
        assert!(listing.error.as_deref().unwrap().contains("Erro ao buscar restaurantes"));
        assert_eq!(
            update(&mut app, Action::LoadNextPage),
            Effect::FetchPage(Some(PageToken("T1".to_string())))
        );
    }

    #[test]
    fn test_results_from_torn_down_mount_are_dropped() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, Action::OpenDetail("A".to_string()));
        update(&mut app, Action::ShowListing);
        assert_eq!(app.mount, 3);

        update(&mut app, loaded(1, &["stale"], None));
        assert!(ids(&app).is_empty());
        assert!(app.listing().unwrap().is_loading);

        update(&mut app, loaded(3, &["fresh"], None));
        assert_eq!(ids(&app), vec!["fresh"]);
    }

    #[test]
    fn test_results_change_refreshes_flags_immediately() {
        let mut app = test_app();
        update(&mut app, Action::Resize(120));
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A", "B"], Some("T1")));
        assert!(!app.listing().unwrap().can_scroll_forward);

        update(&mut app, Action::LoadNextPage);
        update(&mut app, loaded(1, &["C", "D", "E"], None));
        let listing = app.listing().unwrap();
        assert!(listing.can_scroll_forward);
        assert!(!listing.can_scroll_backward);
    }

    #[test]
    fn test_advance_schedules_settle_then_updates_flags() {
        let mut app = test_app();
        update(&mut app, Action::Resize(120));
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A", "B", "C", "D", "E", "F"], None));

        assert_eq!(
            update(&mut app, Action::Advance(Direction::Forward)),
            Effect::ScheduleSettle(SCROLL_SETTLE_DELAY)
        );
        // Flags only move once the scroll settles.
        assert!(!app.listing().unwrap().can_scroll_backward);
        update(&mut app, Action::Tick);
        assert!(app.listing().unwrap().is_scrolling());

        update(&mut app, Action::ScrollSettled { mount: 1 });
        let listing = app.listing().unwrap();
        assert_eq!(listing.scroll.offset, 120);
        assert!(listing.can_scroll_backward);
        assert!(!listing.can_scroll_forward);
    }

    #[test]
    fn test_advance_forward_at_end_loads_next_page() {
        let mut app = test_app();
        update(&mut app, Action::Resize(120));
        update(&mut app, Action::ShowListing);
        update(&mut app, loaded(1, &["A"], Some("T1")));
        assert_eq!(
            update(&mut app, Action::Advance(Direction::Forward)),
            Effect::FetchPage(Some(PageToken("T1".to_string())))
        );
        assert_eq!(update(&mut app, Action::Advance(Direction::Backward)), Effect::None);
    }

    #[test]
    fn test_resize_is_independent_of_fetch_state() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        update(&mut app, Action::Resize(200));
        assert_eq!(app.listing().unwrap().visible_cards, 5);
        assert!(app.listing().unwrap().is_loading);
        update(&mut app, Action::Resize(79));
        assert_eq!(app.listing().unwrap().visible_cards, 1);
    }

    #[test]
    fn test_open_detail_and_load() {
        let mut app = test_app();
        update(&mut app, Action::ShowListing);
        assert_eq!(
            update(&mut app, Action::OpenDetail("p1".to_string())),
            Effect::FetchDetail("p1".to_string())
        );
        let envelope = DetailEnvelope {
            result: Some(RestaurantDetail {
                place_id: None,
                name: "Aprazível".to_string(),
                rating: 4.5,
                price_level: None,
                types: vec![],
                formatted_address: String::new(),
                photos: vec![],
                user_ratings_total: 10,
                formatted_phone_number: None,
                website: None,
                reviews: vec![],
            }),
            status: Some("OK".to_string()),
            error_message: None,
        };
        update(&mut app, Action::DetailLoaded { mount: 2, envelope });
        let detail = app.detail().unwrap();
        assert!(!detail.is_loading);
        assert_eq!(detail.detail.as_ref().unwrap().name, "Aprazível");
    }

    #[test]
    fn test_detail_without_result_is_not_found() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail("p1".to_string()));
        let envelope = DetailEnvelope {
            result: None,
            status: Some("NOT_FOUND".to_string()),
            error_message: None,
        };
        update(&mut app, Action::DetailLoaded { mount: 1, envelope });
        let detail = app.detail().unwrap();
        assert!(!detail.is_loading);
        assert!(detail.detail.is_none());
        assert_eq!(app.status_message, "Detalhes do restaurante não encontrados.");
    }

    #[test]
    fn test_open_detail_requires_place_id() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::OpenDetail("  ".to_string())), Effect::None);
        assert!(app.listing().is_some());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
