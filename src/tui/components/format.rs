//! Small text helpers shared by the card and detail components.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::places::PriceIndicator;

/// Label shown when the places API has no price tier for a restaurant.
pub const PRICE_NOT_IDENTIFIED: &str = "Não identificado";

/// One `$` per slot: green up to the tier, grey after it.
pub fn price_spans(indicator: PriceIndicator) -> Vec<Span<'static>> {
    match indicator {
        PriceIndicator::NotIdentified => vec![Span::styled(
            PRICE_NOT_IDENTIFIED,
            Style::default().add_modifier(Modifier::BOLD),
        )],
        PriceIndicator::Scale { filled, empty } => {
            let filled = (0..filled).map(|_| Span::styled("$", Style::default().fg(Color::Green)));
            let empty = (0..empty).map(|_| Span::styled("$", Style::default().fg(Color::DarkGray)));
            filled.chain(empty).collect()
        }
    }
}

/// `★ 4.3`
pub fn rating_span(rating: f32) -> Span<'static> {
    Span::styled(format!("★ {:.1}", rating), Style::default().fg(Color::Yellow))
}

/// Truncate to `max_width` display columns, adding "..." if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}
