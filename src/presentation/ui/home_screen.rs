//! Landing panels for the `/` and `/admin` routes.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::domain::entities::User;
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::presence_glyph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePanel {
    Home,
    Admin,
}

pub struct HomeScreen<'a> {
    panel: HomePanel,
    user: Option<&'a User>,
    server_count: usize,
    unread_count: usize,
    theme: &'a Theme,
}

impl<'a> HomeScreen<'a> {
    #[must_use]
    pub const fn new(panel: HomePanel, user: Option<&'a User>, theme: &'a Theme) -> Self {
        Self {
            panel,
            user,
            server_count: 0,
            unread_count: 0,
            theme,
        }
    }

    #[must_use]
    pub const fn counts(mut self, servers: usize, unread: usize) -> Self {
        self.server_count = servers;
        self.unread_count = unread;
        self
    }

    fn home_lines(&self) -> Vec<Line<'static>> {
        let accent = Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();

        match self.user {
            Some(user) => {
                let (glyph, colour) = presence_glyph(user.presence());
                lines.push(Line::from(vec![
                    Span::raw("Welcome back, "),
                    Span::styled(user.display_name().to_string(), accent),
                ]));
                lines.push(Line::from(vec![
                    Span::styled(glyph, Style::default().fg(colour)),
                    Span::styled(format!(" {}", user.presence().label()), self.theme.dimmed_style),
                ]));
            }
            None => lines.push(Line::styled("Not signed in", self.theme.dimmed_style)),
        }

        lines.push(Line::default());
        lines.push(Line::raw(format!("{} servers", self.server_count)));
        lines.push(Line::raw(format!("{} unread conversations", self.unread_count)));
        lines.push(Line::default());
        lines.push(Line::styled(
            "Pick a server on the left to open its first channel.",
            self.theme.dimmed_style,
        ));
        lines
    }

    fn admin_lines(&self) -> Vec<Line<'static>> {
        if !self.user.is_some_and(User::is_privileged) {
            return vec![Line::styled(
                "You do not have access to this page.",
                self.theme.dimmed_style,
            )];
        }
        vec![
            Line::styled("Administration", self.theme.header_style),
            Line::default(),
            Line::raw(format!("{} servers cached", self.server_count)),
            Line::styled(
                "Moderation tools are not available in this client.",
                self.theme.dimmed_style,
            ),
        ]
    }
}

impl Widget for HomeScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.panel {
            HomePanel::Home => " Home ",
            HomePanel::Admin => " Admin ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match self.panel {
            HomePanel::Home => self.home_lines(),
            HomePanel::Admin => self.admin_lines(),
        };
        #[allow(clippy::cast_possible_truncation)]
        let height = lines.len() as u16;
        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(inner);
        Paragraph::new(lines).centered().render(body, buf);
    }
}
