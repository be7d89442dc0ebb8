//! Member sidebar for groups and server text channels.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, StatefulWidget, Widget},
};

use super::virtual_list::{VirtualList, VirtualListState, item_area};
use crate::application::services::emoji::render_emoji;
use crate::application::services::member_list::OFFLINE_BUCKET;
use crate::application::services::{
    MemberListEntry, MemberListPipeline, RecipientList, avatar_initial, status_message,
    user_information,
};
use crate::domain::entities::{Channel, ChannelId, ChannelKind, Presence, Server, User, UserId};
use crate::domain::ports::ChatDataPort;
use crate::presentation::theme::{Theme, role_colour};
use crate::presentation::ui::utils::{hash_id_to_color, popup_area, presence_glyph, truncate_to_width};

/// Width of the sidebar column.
pub const MEMBER_SIDEBAR_WIDTH: u16 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSidebarAction {
    /// Copy `text` to the clipboard; `what` describes it for the status line.
    CopyToClipboard { text: String, what: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserMenuItem {
    CopyUserId,
    CopyUsername,
    Mention,
}

impl UserMenuItem {
    pub const ALL: [Self; 3] = [Self::CopyUserId, Self::CopyUsername, Self::Mention];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CopyUserId => "Copy user ID",
            Self::CopyUsername => "Copy username",
            Self::Mention => "Mention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UserMenu {
    user: UserId,
    username: String,
    cursor: usize,
}

impl UserMenu {
    fn action(&self) -> MemberSidebarAction {
        let item = UserMenuItem::ALL[self.cursor.min(UserMenuItem::ALL.len() - 1)];
        let (text, what) = match item {
            UserMenuItem::CopyUserId => (self.user.to_string(), "user ID"),
            UserMenuItem::CopyUsername => (self.username.clone(), "username"),
            UserMenuItem::Mention => (format!("<@{}>", self.user), "mention"),
        };
        MemberSidebarAction::CopyToClipboard { text, what }
    }
}

#[derive(Debug, Default)]
enum SidebarContent {
    #[default]
    Hidden,
    Group {
        users: Vec<User>,
        recipient_count: usize,
    },
    Server {
        entries: Vec<Arc<MemberListEntry>>,
        server: Option<Server>,
        online: usize,
    },
}

impl SidebarContent {
    fn len(&self) -> usize {
        match self {
            Self::Hidden => 0,
            Self::Group { users, .. } => users.len(),
            Self::Server { entries, .. } => entries.len(),
        }
    }

    fn title(&self) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Group {
                recipient_count, ..
            } => Some(format!("{recipient_count} members")),
            Self::Server { online, .. } => Some(format!("{online} members online")),
        }
    }

    /// The user at `index` and the name shown for them.
    fn user_at(&self, index: usize) -> Option<(UserId, String)> {
        match self {
            Self::Hidden => None,
            Self::Group { users, .. } => users
                .get(index)
                .map(|u| (u.id().clone(), u.display_name().to_string())),
            Self::Server { entries, server, .. } => match entries.get(index).map(AsRef::as_ref) {
                Some(MemberListEntry::Member(m)) => {
                    let info = user_information(m.user.as_ref(), Some(&m.member), server.as_ref());
                    Some((m.member.user_id().clone(), info.username))
                }
                _ => None,
            },
        }
    }
}

#[derive(Debug)]
pub struct MemberSidebarState {
    pipeline: MemberListPipeline,
    recipients: RecipientList,
    content: SidebarContent,
    channel: Option<ChannelId>,
    list: VirtualListState,
    menu: Option<UserMenu>,
    focused: bool,
    item_height: u16,
    show_offline: bool,
    viewport: u16,
}

impl Default for MemberSidebarState {
    fn default() -> Self {
        Self::new(1, true)
    }
}

impl MemberSidebarState {
    #[must_use]
    pub fn new(item_height: u16, show_offline: bool) -> Self {
        Self {
            pipeline: MemberListPipeline::new(),
            recipients: RecipientList::default(),
            content: SidebarContent::Hidden,
            channel: None,
            list: VirtualListState::default(),
            menu: None,
            focused: false,
            item_height: item_height.max(1),
            show_offline,
            viewport: 0,
        }
    }

    /// Re-derives the sidebar for `channel`. Cheap when nothing changed.
    pub fn refresh(&mut self, port: &dyn ChatDataPort, channel: Option<&Channel>) {
        let channel_id = channel.map(|c| c.id().clone());
        if channel_id != self.channel {
            self.channel = channel_id;
            self.list = VirtualListState::default();
            self.menu = None;
        }

        self.content = match channel {
            Some(c) if c.kind() == ChannelKind::Group => SidebarContent::Group {
                users: self.recipients.compute(port, c).to_vec(),
                recipient_count: c.recipient_ids().len(),
            },
            Some(c) if c.kind() == ChannelKind::TextChannel && c.server_id().is_some() => {
                let show_offline = self.show_offline;
                let entries = self
                    .pipeline
                    .compute(port, c)
                    .iter()
                    .filter(|e| show_offline || is_online_entry(e))
                    .cloned()
                    .collect();
                SidebarContent::Server {
                    entries,
                    server: self.pipeline.server().cloned(),
                    online: self.pipeline.online_count(),
                }
            }
            _ => SidebarContent::Hidden,
        };
        self.list.clamp(self.content.len());
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self.content, SidebarContent::Hidden)
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.content.title()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Online members of the server, or online recipients of the group.
    #[must_use]
    pub fn online_count(&self) -> Option<usize> {
        match &self.content {
            SidebarContent::Hidden => None,
            SidebarContent::Group { users, .. } => Some(users.iter().filter(|u| u.is_online()).count()),
            SidebarContent::Server { online, .. } => Some(*online),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.menu = None;
        }
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<MemberSidebarAction> {
        if let Some(menu) = self.menu.as_mut() {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    menu.cursor = (menu.cursor + 1).min(UserMenuItem::ALL.len() - 1);
                }
                KeyCode::Char('k') | KeyCode::Up => menu.cursor = menu.cursor.saturating_sub(1),
                KeyCode::Enter => return self.menu.take().map(|m| m.action()),
                KeyCode::Esc => self.menu = None,
                _ => {}
            }
            return None;
        }

        let len = self.content.len();
        let page = usize::from(self.viewport / self.item_height).max(1);
        match (key.code, key.modifiers) {
            (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => self.list.select_next(len),
            (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => self.list.select_previous(len),
            (KeyCode::Char('g'), KeyModifiers::NONE) => self.list.select_first(len),
            (KeyCode::Char('G'), _) => self.list.select_last(len),
            (KeyCode::PageDown, _) => self.list.page_down(len, page),
            (KeyCode::PageUp, _) => self.list.page_up(len, page),
            (KeyCode::Enter | KeyCode::Char('m'), KeyModifiers::NONE) => self.open_menu(),
            _ => {}
        }
        None
    }

    fn open_menu(&mut self) {
        let Some((user, username)) = self.list.selected().and_then(|i| self.content.user_at(i))
        else {
            return;
        };
        self.menu = Some(UserMenu {
            user,
            username,
            cursor: 0,
        });
    }
}

fn is_online_entry(entry: &MemberListEntry) -> bool {
    match entry {
        MemberListEntry::Header { name, .. } => name != OFFLINE_BUCKET,
        MemberListEntry::Member(m) => m.is_online(),
    }
}

pub struct MemberSidebar<'a> {
    theme: &'a Theme,
}

impl<'a> MemberSidebar<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn user_lines(
        &self,
        user: Option<&User>,
        user_id: &str,
        name: &str,
        colour: Option<&str>,
        width: usize,
        item_height: u16,
    ) -> Vec<Line<'static>> {
        let online = user.is_some_and(User::is_online);
        let presence = user.map_or(Presence::Invisible, User::presence);
        let (glyph, glyph_colour) = presence_glyph(presence);

        let name_style = if online {
            colour
                .and_then(role_colour)
                .map_or_else(Style::default, |c| Style::default().fg(c))
        } else {
            self.theme.dimmed_style
        };

        let mut first = vec![
            Span::styled(
                avatar_initial(name),
                Style::default()
                    .fg(hash_id_to_color(user_id))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(glyph, Style::default().fg(glyph_colour)),
            Span::raw(" "),
            Span::styled(truncate_to_width(name, width.saturating_sub(3)).into_owned(), name_style),
        ];

        let status = user.and_then(status_message).map(|s| render_emoji(&s).into_owned());
        let mut lines = Vec::with_capacity(2);
        match status {
            Some(status) if item_height >= 2 => {
                lines.push(Line::from(first));
                lines.push(Line::from(Span::styled(
                    format!("   {}", truncate_to_width(&status, width.saturating_sub(3))),
                    self.theme.dimmed_style,
                )));
            }
            Some(status) => {
                let used = 3 + name.chars().count() + 1;
                if width > used + 2 {
                    first.push(Span::styled(
                        format!(" {}", truncate_to_width(&status, width - used)),
                        self.theme.dimmed_style,
                    ));
                }
                lines.push(Line::from(first));
            }
            None => lines.push(Line::from(first)),
        }
        lines
    }

    fn render_menu(&self, menu: &UserMenu, anchor: Rect, bounds: Rect, buf: &mut Buffer) {
        #[allow(clippy::cast_possible_truncation)]
        let height = UserMenuItem::ALL.len() as u16 + 2;
        let area = popup_area(anchor, 18, height, bounds);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_focused_style);
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, item) in UserMenuItem::ALL.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            if row.y >= inner.bottom() {
                break;
            }
            let style = if i == menu.cursor {
                self.theme.selection_style
            } else {
                Style::default()
            };
            buf.set_style(row, style);
            Line::styled(item.label(), style).render(row, buf);
        }
    }
}

impl StatefulWidget for MemberSidebar<'_> {
    type State = MemberSidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(title) = state.content.title() else {
            return;
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(state.focused))
            .title(format!(" {title} "));
        let inner = block.inner(area);
        block.render(area, buf);
        state.viewport = inner.height;

        let item_height = state.item_height;
        let width = usize::from(inner.width);
        let focused = state.focused;
        let MemberSidebarState { content, list, .. } = &mut *state;
        let content = &*content;

        let list_widget = VirtualList::new(
            content.len(),
            item_height,
            |index, item: Rect, buf: &mut Buffer, selected| {
                let lines = match content {
                    SidebarContent::Hidden => Vec::new(),
                    SidebarContent::Group { users, .. } => users.get(index).map_or_else(Vec::new, |u| {
                        self.user_lines(Some(u), u.id().as_str(), u.display_name(), None, width, item_height)
                    }),
                    SidebarContent::Server { entries, server, .. } => match entries.get(index).map(AsRef::as_ref) {
                        Some(MemberListEntry::Header { name, count }) => vec![Line::styled(
                            format!("{name} - {count}"),
                            self.theme.header_style,
                        )],
                        Some(MemberListEntry::Member(m)) => {
                            let info = user_information(m.user.as_ref(), Some(&m.member), server.as_ref());
                            self.user_lines(
                                m.user.as_ref(),
                                m.member.user_id().as_str(),
                                &info.username,
                                info.colour.as_deref(),
                                width,
                                item_height,
                            )
                        }
                        None => Vec::new(),
                    },
                };

                if selected && focused {
                    buf.set_style(item, self.theme.selection_style);
                }
                for (line, y) in lines.into_iter().zip(item.y..item.bottom()) {
                    line.render(Rect::new(item.x, y, item.width, 1), buf);
                }
            },
        );
        list_widget.render(inner, buf, list);

        if let (Some(menu), Some(selected)) = (&state.menu, state.list.selected())
            && let Some(anchor) = item_area(inner, selected, item_height, state.list.offset())
        {
            self.render_menu(menu, anchor, inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Member, MemberId, Permissions, Role, UserStatus};
    use crate::infrastructure::snapshot::{Snapshot, SnapshotChatClient};
    use crossterm::event::KeyEventKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn client() -> SnapshotChatClient {
        let client = SnapshotChatClient::new(Snapshot {
            self_id: Some("B".into()),
            users: vec![
                User::new("A", "bob").with_display_name("Bob").with_online(true),
                User::new("B", "ann").with_display_name("Ann").with_online(true).with_status(
                    UserStatus {
                        text: Some("coding :rocket:".to_string()),
                        presence: None,
                    },
                ),
                User::new("C", "cid").with_display_name("Cid"),
            ],
            servers: vec![
                Server::new("S1", "Test", "A")
                    .with_default_permissions(Permissions::VIEW_CHANNEL)
                    .with_roles(vec![
                        Role::new("R1", "Mods").hoisted(true).with_colour("#00ff00"),
                    ]),
            ],
            channels: vec![
                Channel::new("T1", ChannelKind::TextChannel).with_server("S1"),
                Channel::new("G1", ChannelKind::Group).with_recipients(vec![
                    "C".into(),
                    "A".into(),
                    "B".into(),
                    "gone".into(),
                ]),
                Channel::new("D1", ChannelKind::DirectMessage),
            ],
            members: vec![
                Member::new(MemberId::new("S1", "A")).with_roles(vec!["R1".into()]),
                Member::new(MemberId::new("S1", "B")),
                Member::new(MemberId::new("S1", "C")).with_roles(vec!["R1".into()]),
            ],
        });
        tokio_test::block_on(client.sync_members(&"S1".into(), false)).unwrap();
        client
    }

    fn channel(client: &SnapshotChatClient, id: &str) -> Channel {
        client.channel(&id.into()).unwrap()
    }

    fn render(state: &mut MemberSidebarState, height: u16) -> Vec<String> {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(34, height)).unwrap();
        terminal
            .draw(|f| f.render_stateful_widget(MemberSidebar::new(&theme), f.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..34).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_server_sidebar_layout() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.refresh(&client, Some(&channel(&client, "T1")));

        let rows = render(&mut state, 10);

        assert!(rows[0].contains("2 members online"));
        assert!(rows[1].contains("Mods - 1"));
        assert!(rows[2].contains("Bob"));
        assert!(rows[3].contains("Online - 1"));
        assert!(rows[4].contains("Ann") && rows[4].contains("coding 🚀"));
        assert!(rows[5].contains("Offline - 1"));
        assert!(rows[6].contains("Cid"));
    }

    #[test]
    fn test_two_row_items_show_status_below() {
        let client = client();
        let mut state = MemberSidebarState::new(2, true);
        state.refresh(&client, Some(&channel(&client, "T1")));

        let rows = render(&mut state, 14);

        assert!(rows[7].contains("Ann"));
        assert!(rows[8].contains("coding 🚀"));
    }

    #[test]
    fn test_hidden_offline_section() {
        let client = client();
        let mut state = MemberSidebarState::new(1, false);
        state.refresh(&client, Some(&channel(&client, "T1")));

        assert_eq!(state.len(), 4);
        let rows = render(&mut state, 10);
        assert!(rows.iter().all(|r| !r.contains("Offline")));
    }

    #[test]
    fn test_group_sidebar_sorted_without_buckets() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.refresh(&client, Some(&channel(&client, "G1")));

        assert_eq!(state.title().as_deref(), Some("4 members"));
        assert_eq!(state.online_count(), Some(2));
        let rows = render(&mut state, 8);
        assert!(rows[1].contains("Ann"));
        assert!(rows[2].contains("Bob"));
        assert!(rows[3].contains("Cid"));
    }

    #[test]
    fn test_direct_message_has_no_sidebar() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.refresh(&client, Some(&channel(&client, "D1")));

        assert!(!state.is_visible());
        assert!(render(&mut state, 4).iter().all(|r| r.trim().is_empty()));
    }

    #[test]
    fn test_menu_on_header_does_nothing() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.set_focused(true);
        state.refresh(&client, Some(&channel(&client, "T1")));

        state.handle_key(key(KeyCode::Char('j')));
        state.handle_key(key(KeyCode::Enter));

        assert_eq!(state.selected(), Some(0));
        assert!(!state.is_menu_open());
    }

    #[test]
    fn test_menu_mention_copies_mention() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.set_focused(true);
        state.refresh(&client, Some(&channel(&client, "T1")));

        state.handle_key(key(KeyCode::Char('j')));
        state.handle_key(key(KeyCode::Char('j')));
        state.handle_key(key(KeyCode::Char('m')));
        assert!(state.is_menu_open());
        let rows = render(&mut state, 12);
        assert!(rows.iter().any(|r| r.contains("Copy user ID")));

        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Down));
        let action = state.handle_key(key(KeyCode::Enter));

        assert_eq!(
            action,
            Some(MemberSidebarAction::CopyToClipboard {
                text: "<@A>".to_string(),
                what: "mention",
            })
        );
        assert!(!state.is_menu_open());
    }

    #[test]
    fn test_menu_copy_username_uses_display_name() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.refresh(&client, Some(&channel(&client, "G1")));

        state.handle_key(key(KeyCode::Char('g')));
        state.handle_key(key(KeyCode::Enter));
        state.handle_key(key(KeyCode::Char('j')));

        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(MemberSidebarAction::CopyToClipboard {
                text: "Ann".to_string(),
                what: "username",
            })
        );
    }

    #[test]
    fn test_switching_channel_resets_selection() {
        let client = client();
        let mut state = MemberSidebarState::default();
        state.refresh(&client, Some(&channel(&client, "T1")));
        state.handle_key(key(KeyCode::Char('G')));

        state.refresh(&client, Some(&channel(&client, "G1")));

        assert_eq!(state.selected(), None);
    }
}
