//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status bar with the page title and status message
//! - `RestaurantCard`: one card of the carousel
//! - `Carousel`: the horizontal strip of cards over `ListingState`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state in `TuiState` and emit events:
//! - `ReservationFormState` / `ReservationForm`: home and detail reservation forms
//! - `DetailPageState` / `DetailPage`: tabs, review scroll and the photo drawer
//!
//! Core state (what is loaded, where the carousel is scrolled) is never owned
//! here; components read it as props and report intent as events.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── format.rs           (price, rating and truncation helpers)
//! ├── title_bar.rs        (top status bar)
//! ├── restaurant_card.rs  (single card)
//! ├── carousel.rs         (scrolling strip of cards)
//! ├── reservation_form.rs (reservation forms)
//! └── detail_page.rs      (detail tabs and photo drawer)
//! ```

pub mod carousel;
pub mod detail_page;
pub mod format;
pub mod reservation_form;
pub mod restaurant_card;
mod title_bar;

pub use carousel::Carousel;
pub use detail_page::{DetailEvent, DetailPage, DetailPageState};
pub use reservation_form::{FormEvent, ReservationForm, ReservationFormState};
pub use title_bar::TitleBar;
