//! Bottom bar: focus indicator, key hints and the transient status message.

use std::fmt::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::keybinding::Keybind;
use crate::presentation::theme::{Theme, shade};

/// Which part of the screen receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusContext {
    #[default]
    Servers,
    Channel,
    Members,
    /// A server is picked up in the server list.
    Reorder,
    /// The member context menu is open.
    Menu,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Servers => "SERVERS",
            Self::Channel => "CHANNEL",
            Self::Members => "MEMBERS",
            Self::Reorder => "REORDER",
            Self::Menu => "MENU",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

pub struct FooterBarStyle {
    pub background: Style,
    pub label_style: Style,
    pub key_style: Style,
    pub focus_indicator: Style,
}

impl FooterBarStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        let key_bg = shade(theme.accent, 0.5, 0.08);

        Self {
            background: Style::default(),
            label_style: Style::default()
                .bg(theme.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            key_style: Style::default().bg(key_bg).fg(Color::White),
            focus_indicator: Style::default()
                .bg(key_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

pub struct FooterBar<'a> {
    keybindings: &'a [Keybind],
    focus_context: Option<FocusContext>,
    status: Option<(&'a str, StatusLevel)>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(keybindings: &'a [Keybind]) -> Self {
        Self {
            keybindings,
            focus_context: None,
            status: None,
            style: FooterBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn focus_context(mut self, context: FocusContext) -> Self {
        self.focus_context = Some(context);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Option<(&'a str, StatusLevel)>) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn style(mut self, style: FooterBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Short label for a key, e.g. `C-q`, `Enter` or `↑`.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        let mut s = String::new();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("C-");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("A-");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
            s.push_str("S-");
        }

        match key.code {
            KeyCode::Char(' ') => s.push_str("Space"),
            KeyCode::Char(c) => s.push(c),
            KeyCode::Enter => s.push_str("Enter"),
            KeyCode::Esc => s.push_str("Esc"),
            KeyCode::Tab => s.push_str("Tab"),
            KeyCode::BackTab => s.push_str("S-Tab"),
            KeyCode::Up => s.push('↑'),
            KeyCode::Down => s.push('↓'),
            KeyCode::Left => s.push('←'),
            KeyCode::Right => s.push('→'),
            KeyCode::PageUp => s.push_str("PgUp"),
            KeyCode::PageDown => s.push_str("PgDn"),
            KeyCode::F(n) => {
                let _ = write!(s, "F{n}");
            }
            other => {
                let _ = write!(s, "{other:?}");
            }
        }
        s
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        if let Some(context) = self.focus_context {
            spans.push(Span::styled(
                format!(" {} ", context.display_name()),
                self.style.focus_indicator,
            ));
            spans.push(Span::raw(" "));
        }

        for (i, binding) in self.keybindings.iter().filter(|k| k.visible_in_bar).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(format!(" {} ", binding.label), self.style.label_style));
            spans.push(Span::styled(
                format!(" {} ", Self::format_key(&binding.key)),
                self.style.key_style,
            ));
        }

        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, self.style.background);

        let status_width = self
            .status
            .map_or(0, |(text, _)| u16::try_from(text.width()).unwrap_or(u16::MAX));
        let status_width = status_width.min(area.width / 2);

        let left_width = area.width.saturating_sub(status_width + 1);
        Paragraph::new(Line::from(self.hint_spans()))
            .render(Rect::new(area.x, area.y, left_width, 1), buf);

        if let Some((text, level)) = self.status
            && status_width > 0
        {
            let right = Rect::new(area.right() - status_width, area.y, status_width, 1);
            Line::styled(text, Style::default().fg(level.color())).render(right, buf);
        }
    }
}
