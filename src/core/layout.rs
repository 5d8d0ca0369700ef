//! # Carousel Layout
//!
//! Viewport-derived layout for the restaurant carousel. Everything here is
//! measured in terminal columns and is independent of fetch state.
//!
//! ```text
//!  offset
//!    │◄──────── viewport ────────►│
//! ┌──┼──┬─────┬─────┬─────┬─────┬─┼───┬─────┐
//! │ A│  │  B  │  C  │  D  │  E  │ │F  │  G  │   content = cards × card_width
//! └──┼──┴─────┴─────┴─────┴─────┴─┼───┴─────┘
//! ```

/// Width breakpoints, widest first. A width equal to a threshold picks that tier.
pub const BREAKPOINTS: [(u16, usize); 4] = [(200, 5), (160, 4), (120, 3), (80, 2)];

/// Maps a viewport width to the number of cards shown side by side.
pub fn visible_card_count(width: u16) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min_width, _)| width >= *min_width)
        .map(|&(_, cards)| cards)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// Horizontal scroll geometry of the carousel, like a DOM element's
/// `scrollLeft` / `clientWidth` / `scrollWidth`.
///
/// `target` is where the current smooth scroll is heading; `offset` is where
/// it is now. They differ only while a scroll is in motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollGeometry {
    pub offset: u32,
    pub target: u32,
    pub viewport: u32,
    pub content: u32,
    /// Width of one card, fixed by the last `remeasure`.
    pub card: u32,
}

impl ScrollGeometry {
    pub fn card_width(&self) -> u32 {
        self.card.max(1)
    }

    pub fn max_offset(&self) -> u32 {
        self.content.saturating_sub(self.viewport)
    }

    /// Re-measures for a new viewport and card count, keeping the first
    /// visible card in place.
    pub fn remeasure(&mut self, viewport: u16, visible: usize, cards: usize) {
        let first_card = self.target / self.card_width();

        self.viewport = viewport as u32;
        self.card = (self.viewport / visible.max(1) as u32).max(1);
        self.content = self.card * cards as u32;
        self.target = (first_card * self.card).min(self.max_offset());
        self.offset = self.target;
    }

    /// Recomputes the content extent after the card count changed.
    pub fn set_cards(&mut self, cards: usize) {
        self.content = self.card_width() * cards as u32;
        self.target = self.target.min(self.max_offset());
        self.offset = self.offset.min(self.max_offset());
    }

    /// Distance of one "page": all visible cards.
    pub fn page_shift(&self, visible: usize) -> u32 {
        self.card_width() * visible as u32
    }

    /// Moves the scroll target by one page. Returns false if already at that edge.
    pub fn advance(&mut self, direction: Direction, visible: usize) -> bool {
        let shift = self.page_shift(visible);
        let next = match direction {
            Direction::Backward => self.target.saturating_sub(shift),
            Direction::Forward => (self.target + shift).min(self.max_offset()),
        };
        let moved = next != self.target;
        self.target = next;
        moved
    }

    /// One frame of smooth scrolling: covers half the remaining distance.
    /// Returns true while still in motion.
    pub fn step(&mut self) -> bool {
        if self.offset == self.target {
            return false;
        }
        let remaining = self.offset.abs_diff(self.target);
        let delta = remaining.div_ceil(2);
        if self.target > self.offset {
            self.offset += delta;
        } else {
            self.offset -= delta;
        }
        self.offset != self.target
    }

    /// Finishes any motion in progress.
    pub fn settle(&mut self) {
        self.offset = self.target;
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.offset > 0
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.offset + self.viewport < self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_card_count_thresholds() {
        assert_eq!(visible_card_count(0), 1);
        assert_eq!(visible_card_count(79), 1);
        assert_eq!(visible_card_count(80), 2);
        assert_eq!(visible_card_count(119), 2);
        assert_eq!(visible_card_count(120), 3);
        assert_eq!(visible_card_count(159), 3);
        assert_eq!(visible_card_count(160), 4);
        assert_eq!(visible_card_count(199), 4);
        assert_eq!(visible_card_count(200), 5);
        assert_eq!(visible_card_count(u16::MAX), 5);
    }

    #[test]
    fn test_visible_card_count_is_idempotent() {
        for width in [0, 80, 123, 200, 512] {
            assert_eq!(visible_card_count(width), visible_card_count(width));
        }
    }

    fn geometry(viewport: u16, visible: usize, cards: usize) -> ScrollGeometry {
        let mut g = ScrollGeometry::default();
        g.remeasure(viewport, visible, cards);
        g
    }

    #[test]
    fn test_page_shift_is_visible_cards_times_card_width() {
        let g = geometry(120, 3, 10);
        assert_eq!(g.card_width(), 40);
        assert_eq!(g.page_shift(3), 120);
        assert_eq!(g.content, 400);
    }

    #[test]
    fn test_advance_clamps_to_extent() {
        let mut g = geometry(120, 3, 4);
        assert!(g.advance(Direction::Forward, 3));
        assert_eq!(g.target, 40);
        assert!(!g.advance(Direction::Forward, 3));
        assert!(g.advance(Direction::Backward, 3));
        assert_eq!(g.target, 0);
        assert!(!g.advance(Direction::Backward, 3));
    }

    #[test]
    fn test_step_converges_on_target() {
        let mut g = geometry(120, 3, 10);
        g.advance(Direction::Forward, 3);
        let mut frames = 0;
        while g.step() {
            frames += 1;
            assert!(frames < 16);
        }
        assert_eq!(g.offset, 120);
    }

    #[test]
    fn test_boundary_flags() {
        let mut g = geometry(120, 3, 6);
        assert!(!g.can_scroll_backward());
        assert!(g.can_scroll_forward());
        g.advance(Direction::Forward, 3);
        g.settle();
        assert!(g.can_scroll_backward());
        assert!(!g.can_scroll_forward());
    }

    #[test]
    fn test_remeasure_keeps_first_card() {
        let mut g = geometry(120, 3, 10);
        g.advance(Direction::Forward, 3);
        g.settle();
        assert_eq!(g.offset / g.card_width(), 3);

        g.remeasure(80, 2, 10);
        assert_eq!(g.card_width(), 40);
        assert_eq!(g.offset / g.card_width(), 3);
    }

    #[test]
    fn test_fewer_cards_than_viewport() {
        let g = geometry(200, 5, 2);
        assert_eq!(g.max_offset(), 0);
        assert!(!g.can_scroll_forward());
        assert!(!g.can_scroll_backward());
    }
}
