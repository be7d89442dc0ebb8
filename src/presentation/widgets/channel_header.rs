//! Channel header: kind prefix, name, online count and description.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::truncate_to_width;

pub struct ChannelHeaderStyle {
    pub channel_name: Style,
    pub channel_icon: Style,
    pub online_count: Style,
    pub separator: Style,
    pub topic: Style,
    pub border: Style,
}

impl ChannelHeaderStyle {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            channel_name: Style::default().add_modifier(Modifier::BOLD),
            channel_icon: Style::default().fg(theme.accent),
            online_count: theme.dimmed_style,
            separator: theme.dimmed_style,
            topic: theme.dimmed_style,
            border: theme.border_style,
        }
    }
}

impl Default for ChannelHeaderStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

#[derive(Default)]
pub struct ChannelHeader<'a> {
    channel_name: Option<&'a str>,
    channel_icon: Option<&'a str>,
    online_count: Option<usize>,
    topic: Option<&'a str>,
    style: ChannelHeaderStyle,
}

impl<'a> ChannelHeader<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn channel_name(mut self, name: Option<&'a str>) -> Self {
        self.channel_name = name;
        self
    }

    #[must_use]
    pub const fn channel_icon(mut self, icon: Option<&'a str>) -> Self {
        self.channel_icon = icon;
        self
    }

    #[must_use]
    pub const fn online_count(mut self, count: Option<usize>) -> Self {
        self.online_count = count;
        self
    }

    #[must_use]
    pub const fn topic(mut self, topic: Option<&'a str>) -> Self {
        self.topic = topic;
        self
    }

    #[must_use]
    pub fn style(mut self, style: ChannelHeaderStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for ChannelHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.style.border);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let width = usize::from(inner.width);
        let mut spans = Vec::new();

        if let Some(icon) = self.channel_icon {
            spans.push(Span::styled(format!("{icon} "), self.style.channel_icon));
        }
        if let Some(name) = self.channel_name {
            spans.push(Span::styled(
                truncate_to_width(name, width / 2).into_owned(),
                self.style.channel_name,
            ));
        }
        if let Some(count) = self.online_count {
            spans.push(Span::styled(" • ", self.style.separator));
            spans.push(Span::styled(format!("{count} online"), self.style.online_count));
        }

        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        if let Some(topic) = self.topic.filter(|t| !t.trim().is_empty()) {
            let available = width.saturating_sub(used + 3);
            if available > 1 {
                spans.push(Span::styled(" │ ", self.style.separator));
                let first_line = topic.lines().next().unwrap_or_default();
                spans.push(Span::styled(
                    truncate_to_width(first_line, available).into_owned(),
                    self.style.topic,
                ));
            }
        }

        Line::from(spans).render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
    }
}
