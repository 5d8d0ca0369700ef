//! # Application State
//!
//! Core business state for Mesa. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn RestaurantSource>  // where restaurants come from
//! ├── screen: Screen                     // the mounted view
//! │   ├── Listing(ListingState)          // carousel + pagination
//! │   └── Detail(DetailState)            // one restaurant
//! ├── mount: u64                         // generation of the mounted view
//! ├── viewport_width: u16                // last layout signal
//! └── status_message: String             // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! Every navigation bumps `mount`; results tagged with an older mount are
//! dropped, so a torn-down view never receives late data.

use std::sync::Arc;
use std::time::Duration;

use crate::core::layout::{ScrollGeometry, visible_card_count};
use crate::places::{PageToken, RestaurantDetail, RestaurantSource, RestaurantSummary};

/// How long a smooth scroll is given to finish before the boundary flags are recomputed.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Where the next page load continues from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Nothing fetched yet.
    Start,
    /// More pages are available behind this token.
    Continue(PageToken),
    /// The last page carried no token.
    Exhausted,
}

impl Cursor {
    pub fn from_token(token: Option<PageToken>) -> Self {
        match token {
            Some(token) => Cursor::Continue(token),
            None => Cursor::Exhausted,
        }
    }
}

/// The paginated restaurant listing behind the carousel.
#[derive(Debug, Clone)]
pub struct ListingState {
    /// Append-only, in arrival order.
    pub results: Vec<RestaurantSummary>,
    pub cursor: Cursor,
    pub is_loading: bool,
    pub visible_cards: usize,
    pub can_scroll_backward: bool,
    pub can_scroll_forward: bool,
    pub scroll: ScrollGeometry,
    /// Last fetch failure, shown until the next successful page.
    pub error: Option<String>,
}

impl ListingState {
    pub fn new(viewport_width: u16) -> Self {
        let visible_cards = visible_card_count(viewport_width);
        let mut scroll = ScrollGeometry::default();
        scroll.remeasure(viewport_width, visible_cards, 0);
        Self {
            results: Vec::new(),
            cursor: Cursor::Start,
            is_loading: false,
            visible_cards,
            can_scroll_backward: false,
            // Optimistic until the first measurement; a page is on the way.
            can_scroll_forward: true,
            scroll,
            error: None,
        }
    }

    pub fn has_more(&self) -> bool {
        !matches!(self.cursor, Cursor::Exhausted)
    }

    /// Recomputes the boundary flags from the current scroll geometry.
    pub fn refresh_scroll_flags(&mut self) {
        self.can_scroll_backward = self.scroll.can_scroll_backward();
        self.can_scroll_forward = self.scroll.can_scroll_forward();
    }

    /// True while a smooth scroll is still moving.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.offset != self.scroll.target
    }
}

/// The detail page for one restaurant.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub place_id: String,
    pub is_loading: bool,
    pub detail: Option<RestaurantDetail>,
    pub error: Option<String>,
}

impl DetailState {
    pub fn new(place_id: String) -> Self {
        Self {
            place_id,
            is_loading: true,
            detail: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Listing(ListingState),
    Detail(DetailState),
}

pub struct App {
    pub source: Arc<dyn RestaurantSource>,
    pub screen: Screen,
    pub mount: u64,
    pub viewport_width: u16,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn RestaurantSource>, viewport_width: u16) -> Self {
        Self {
            source,
            screen: Screen::Listing(ListingState::new(viewport_width)),
            mount: 0,
            viewport_width,
            status_message: String::from("Bem-vindo ao Mesa!"),
        }
    }

    pub fn listing(&self) -> Option<&ListingState> {
        match &self.screen {
            Screen::Listing(listing) => Some(listing),
            Screen::Detail(_) => None,
        }
    }

    pub fn detail(&self) -> Option<&DetailState> {
        match &self.screen {
            Screen::Detail(detail) => Some(detail),
            Screen::Listing(_) => None,
        }
    }

    /// True while something on screen is changing without user input.
    pub fn is_animating(&self) -> bool {
        match &self.screen {
            Screen::Listing(listing) => listing.is_loading || listing.is_scrolling(),
            Screen::Detail(detail) => detail.is_loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Bem-vindo ao Mesa!");
        assert_eq!(app.mount, 0);
        let listing = app.listing().unwrap();
        assert!(listing.results.is_empty());
        assert_eq!(listing.cursor, Cursor::Start);
        assert!(!listing.is_loading);
    }

    #[test]
    fn test_cursor_from_token() {
        assert_eq!(Cursor::from_token(None), Cursor::Exhausted);
        assert_eq!(
            Cursor::from_token(Some(PageToken("T1".to_string()))),
            Cursor::Continue(PageToken("T1".to_string()))
        );
    }

    #[test]
    fn test_listing_measures_viewport_on_creation() {
        let listing = ListingState::new(160);
        assert_eq!(listing.visible_cards, 4);
        assert_eq!(listing.scroll.viewport, 160);
        assert_eq!(listing.scroll.card_width(), 40);
    }
}
