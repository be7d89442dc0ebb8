use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::Presence;

/// Generated avatar text: the first letter of up to two words, uppercased.
#[must_use]
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Truncates `s` to at most `width` columns, ending with `…` when cut.
#[must_use]
pub fn truncate_to_width(s: &str, width: usize) -> Cow<'_, str> {
    if s.width() <= width {
        return Cow::Borrowed(s);
    }
    if width == 0 {
        return Cow::Borrowed("");
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

const USER_PALETTE: &[Color] = &[
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
];

/// Stable colour for an id, used for generated avatars.
#[must_use]
pub fn hash_id_to_color(id: &str) -> Color {
    // FNV-1a
    let hash = id.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    #[allow(clippy::cast_possible_truncation)]
    let index = (hash % USER_PALETTE.len() as u64) as usize;
    USER_PALETTE[index]
}

pub const fn presence_glyph(presence: Presence) -> (&'static str, Color) {
    match presence {
        Presence::Online => ("●", Color::Green),
        Presence::Idle => ("◐", Color::Yellow),
        Presence::Focus => ("◉", Color::Blue),
        Presence::Busy => ("⊖", Color::Red),
        Presence::Invisible => ("○", Color::DarkGray),
    }
}

/// Places a `width` x `height` popup below `anchor`, or above it when there
/// is no room below, kept inside `bounds`.
#[must_use]
pub fn popup_area(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = anchor.bottom();
    let y = if below + height <= bounds.bottom() {
        below
    } else {
        anchor.y.saturating_sub(height).max(bounds.y)
    };
    let x = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Rust Lounge", "RL" ; "two words")]
    #[test_case("workshop", "W" ; "one word")]
    #[test_case("a b c", "AB" ; "at most two")]
    #[test_case("  ", "?" ; "blank")]
    #[test_case("🎮 gamers", "G" ; "skips emoji word")]
    fn test_initials(name: &str, expected: &str) {
        assert_eq!(initials(name), expected);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("general", 10), "general");
        assert_eq!(truncate_to_width("general", 5), "gene…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_hash_id_is_stable() {
        assert_eq!(hash_id_to_color("U_ANN"), hash_id_to_color("U_ANN"));
    }

    #[test]
    fn test_popup_prefers_below() {
        let bounds = Rect::new(0, 0, 40, 20);
        let anchor = Rect::new(5, 3, 20, 1);

        assert_eq!(popup_area(anchor, 18, 5, bounds), Rect::new(5, 4, 18, 5));
    }

    #[test]
    fn test_popup_flips_above_and_clamps() {
        let bounds = Rect::new(0, 0, 40, 20);
        let anchor = Rect::new(30, 18, 10, 1);

        assert_eq!(popup_area(anchor, 18, 5, bounds), Rect::new(22, 13, 18, 5));
    }
}
