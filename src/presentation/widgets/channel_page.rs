//! Channel page: dispatches on the resolved channel kind.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget, Wrap},
};

use super::channel_header::{ChannelHeader, ChannelHeaderStyle};
use super::member_sidebar::{MEMBER_SIDEBAR_WIDTH, MemberSidebar, MemberSidebarState};
use crate::application::services::emoji::render_emoji;
use crate::application::use_cases::ChannelPageView;
use crate::presentation::theme::Theme;

const HEADER_HEIGHT: u16 = 2;

pub const NOT_FOUND_TEXT: &str = "404";
pub const LEGACY_VOICE_TEXT: &str = "Legacy voice channels are not supported!";
pub const UNKNOWN_KIND_TEXT: &str = "Unknown channel type!";
pub const MESSAGES_PLACEHOLDER: &str = "Messages are not available in this client";

pub struct ChannelPage<'a> {
    view: &'a ChannelPageView,
    theme: &'a Theme,
    title: Option<&'a str>,
}

impl<'a> ChannelPage<'a> {
    #[must_use]
    pub const fn new(view: &'a ChannelPageView, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            title: None,
        }
    }

    /// Overrides the header name, e.g. with a conversation label.
    #[must_use]
    pub const fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    fn centered(&self, text: &str, area: Rect, buf: &mut Buffer, bold: bool) {
        let style = if bold {
            self.theme.header_style.add_modifier(Modifier::BOLD)
        } else {
            self.theme.dimmed_style
        };
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        Line::styled(text.to_string(), style).centered().render(middle, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, online: Option<usize>) {
        let Some(channel) = self.view.channel() else {
            return;
        };
        let name = self.title.or_else(|| channel.name()).unwrap_or(channel.id().as_str());
        let topic = channel.description().map(render_emoji);

        ChannelHeader::new()
            .channel_icon(Some(channel.kind().prefix()))
            .channel_name(Some(name))
            .online_count(online)
            .topic(topic.as_deref())
            .style(ChannelHeaderStyle::from_theme(self.theme))
            .render(area, buf);
    }
}

impl StatefulWidget for ChannelPage<'_> {
    type State = MemberSidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, sidebar: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        match self.view {
            ChannelPageView::NotFound => {
                let [code, text] =
                    Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .areas(area);
                self.centered(NOT_FOUND_TEXT, code, buf, true);
                Paragraph::new(Line::styled("Channel not found", self.theme.dimmed_style).centered())
                    .render(text, buf);
            }
            ChannelPageView::Unsupported(_) => self.centered(UNKNOWN_KIND_TEXT, area, buf, false),
            ChannelPageView::LegacyVoice(_) => {
                let [header, body] =
                    Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)])
                        .areas(area);
                self.render_header(header, buf, None);
                self.centered(LEGACY_VOICE_TEXT, body, buf, false);
            }
            ChannelPageView::Text(_) => {
                let with_sidebar = self.view.has_member_sidebar() && sidebar.is_visible();
                let [header, body] =
                    Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)])
                        .areas(area);
                self.render_header(header, buf, sidebar.online_count());

                let (messages, members) = if with_sidebar {
                    let [messages, members] = Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Length(MEMBER_SIDEBAR_WIDTH),
                    ])
                    .areas(body);
                    (messages, Some(members))
                } else {
                    (body, None)
                };

                Paragraph::new(Line::styled(MESSAGES_PLACEHOLDER, self.theme.dimmed_style).centered())
                    .wrap(Wrap { trim: true })
                    .render(messages, buf);

                if let Some(members) = members {
                    MemberSidebar::new(self.theme).render(members, buf, sidebar);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ChannelKind, Member, MemberId, Server, User};
    use crate::domain::ports::ChatDataPort;
    use crate::infrastructure::snapshot::{Snapshot, SnapshotChatClient};
    use ratatui::{Terminal, backend::TestBackend};

    const WIDTH: u16 = 80;

    fn render(view: &ChannelPageView, sidebar: &mut MemberSidebarState) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, 12)).unwrap();
        terminal
            .draw(|f| f.render_stateful_widget(ChannelPage::new(view, &theme), f.area(), sidebar))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..12)
            .map(|y| (0..WIDTH).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_not_found() {
        let screen = render(&ChannelPageView::NotFound, &mut MemberSidebarState::default());
        assert!(screen.contains(NOT_FOUND_TEXT));
    }

    #[test]
    fn test_unknown_kind() {
        let view = ChannelPageView::Unsupported(Channel::new("C", ChannelKind::Unknown));
        let screen = render(&view, &mut MemberSidebarState::default());
        assert!(screen.contains(UNKNOWN_KIND_TEXT));
    }

    #[test]
    fn test_legacy_voice_shows_header_and_notice() {
        let view = ChannelPageView::LegacyVoice(
            Channel::new("V", ChannelKind::VoiceChannel).with_name("hangout"),
        );
        let screen = render(&view, &mut MemberSidebarState::default());
        assert!(screen.contains("hangout"));
        assert!(screen.contains(LEGACY_VOICE_TEXT));
    }

    #[test]
    fn test_text_channel_with_sidebar() {
        let channel = Channel::new("T", ChannelKind::TextChannel)
            .with_name("general")
            .with_server("S")
            .with_description("say hi :wave:");
        let client = SnapshotChatClient::new(Snapshot {
            self_id: Some("U".into()),
            users: vec![User::new("U", "me").with_online(true)],
            servers: vec![Server::new("S", "Server", "U")],
            channels: vec![channel.clone()],
            members: vec![Member::new(MemberId::new("S", "U"))],
        });
        let mut sidebar = MemberSidebarState::default();
        sidebar.refresh(&client, client.channel(&"T".into()).as_ref());

        let screen = render(&ChannelPageView::Text(channel), &mut sidebar);

        assert!(screen.contains("# general • 1 online │ say hi 👋"));
        assert!(screen.contains(MESSAGES_PLACEHOLDER));
        assert!(screen.contains("1 members online"));
    }

    #[test]
    fn test_direct_message_has_no_sidebar() {
        let channel = Channel::new("D", ChannelKind::DirectMessage);
        let screen = render(
            &ChannelPageView::Text(channel),
            &mut MemberSidebarState::default(),
        );
        assert!(screen.contains(MESSAGES_PLACEHOLDER));
        assert!(!screen.contains("members"));
    }
}
