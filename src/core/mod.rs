//! # Core Application Logic
//!
//! This module contains Mesa's business logic.
//! It knows nothing about any specific UI technology or about HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • layout, lookups      │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ── RestaurantSource ───► │   Proxy    │
//!     │  Adapter   │        (HTTP)            │  (server)  │
//!     │ (ratatui)  │                          │   (axum)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the listing/detail view states
//! - [`action`]: The `Action` enum and `update()`
//! - [`layout`]: Cards-per-view breakpoints and carousel scroll geometry
//! - [`lookup`]: Time slots and party sizes for the reservation forms
//! - [`reservation`]: What a submitted reservation form holds
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod layout;
pub mod lookup;
pub mod reservation;
pub mod state;
