//! Styles derived from the configured accent colour.

mod colour;

pub use colour::{parse_color, role_colour, shade};

use ratatui::style::{Color, Modifier, Style};

const DEFAULT_ACCENT: Color = Color::Rgb(0xFD, 0x66, 0x71);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    /// Marker beside the selected server list entry.
    pub swoosh_style: Style,
    pub badge_style: Style,
    pub selection_style: Style,
    pub dimmed_style: Style,
    pub header_style: Style,
    pub border_style: Style,
    pub border_focused_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(DEFAULT_ACCENT)
    }
}

impl Theme {
    /// Builds a theme from a colour name or hex code, falling back to the
    /// default accent when it cannot be parsed.
    #[must_use]
    pub fn new(accent: &str) -> Self {
        parse_color(accent).map_or_else(
            || {
                tracing::warn!(accent, "Unrecognised accent colour, using default");
                Self::default()
            },
            Self::from_color,
        )
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        let selection_bg = shade(accent, 0.3, 0.2);

        Self {
            accent,
            swoosh_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            badge_style: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            selection_style: Style::default().bg(selection_bg).fg(Color::White),
            dimmed_style: Style::default().fg(Color::DarkGray),
            header_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::DarkGray),
            border_focused_style: Style::default().fg(accent),
        }
    }

    #[must_use]
    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused_style
        } else {
            self.border_style
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let theme = Theme::new("Cyan");
        assert_eq!(theme.accent, Color::Cyan);
        assert_eq!(theme.border(true).fg, Some(Color::Cyan));
    }

    #[test]
    fn test_invalid_accent_falls_back() {
        assert_eq!(Theme::new("nonsense").accent, DEFAULT_ACCENT);
    }
}
