//! Server sidebar: home, admin shortcut, unread conversations and the
//! user's servers, with keyboard reordering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};
use tracing::debug;

use crate::application::services::move_item;
use crate::domain::entities::{Channel, Server, ServerId, User};
use crate::domain::routing::Route;
use crate::presentation::theme::Theme;
use crate::presentation::ui::utils::{hash_id_to_color, initials, presence_glyph, truncate_to_width};

const SWOOSH: &str = "▌";
const GRAB_MARKER: &str = "≡";

/// A direct conversation with unread messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub channel: Channel,
    /// Channel name, or the other participant's username.
    pub label: String,
}

/// Row kinds in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerListItem {
    Home,
    Admin,
    Conversation(usize),
    Divider,
    Server(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerListAction {
    Navigate(Route),
    /// The full server id sequence after a drop.
    Reorder(Vec<ServerId>),
}

#[derive(Debug, Clone)]
struct DragSession {
    original: Vec<Server>,
    origin: usize,
    index: usize,
}

#[derive(Debug, Default)]
pub struct ServerListState {
    user: Option<User>,
    conversations: Vec<Conversation>,
    servers: Vec<Server>,
    selected_server: Option<ServerId>,
    cursor: usize,
    drag: Option<DragSession>,
    focused: bool,
}

impl ServerListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.clamp_cursor();
    }

    pub fn set_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
        self.clamp_cursor();
    }

    /// Replaces the servers, cancelling any reorder in progress.
    pub fn set_servers(&mut self, servers: Vec<Server>) {
        self.drag = None;
        self.servers = servers;
        self.clamp_cursor();
    }

    pub fn set_selected_server(&mut self, server: Option<ServerId>) {
        self.selected_server = server;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn items(&self) -> Vec<ServerListItem> {
        let mut items = Vec::with_capacity(self.conversations.len() + self.servers.len() + 3);
        items.push(ServerListItem::Home);
        if self.user.as_ref().is_some_and(User::is_privileged) {
            items.push(ServerListItem::Admin);
        }
        items.extend((0..self.conversations.len()).map(ServerListItem::Conversation));
        items.push(ServerListItem::Divider);
        items.extend((0..self.servers.len()).map(ServerListItem::Server));
        items
    }

    /// Whether `item` carries the selection indicator.
    #[must_use]
    pub fn is_active(&self, item: ServerListItem) -> bool {
        match item {
            ServerListItem::Home => self.selected_server.is_none(),
            ServerListItem::Server(i) => self
                .selected_server
                .as_ref()
                .is_some_and(|id| self.servers.get(i).is_some_and(|s| s.id() == id)),
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ServerListAction> {
        if self.drag.is_some() {
            return self.handle_drag_key(key);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => {
                self.move_cursor(1);
                None
            }
            (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => {
                self.move_cursor(-1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.cursor = 0;
                None
            }
            (KeyCode::Char('G'), _) => {
                self.cursor = self.items().len().saturating_sub(1);
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self.route_at_cursor().map(ServerListAction::Navigate),
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                self.pick_up();
                None
            }
            _ => None,
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) -> Option<ServerListAction> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.shift_dragged(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.shift_dragged(-1);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.drop_dragged(),
            KeyCode::Esc => {
                self.cancel_drag();
                None
            }
            _ => None,
        }
    }

    fn route_at_cursor(&self) -> Option<Route> {
        match self.items().get(self.cursor)? {
            ServerListItem::Home => Some(Route::Home),
            ServerListItem::Admin => Some(Route::Admin),
            ServerListItem::Conversation(i) => self
                .conversations
                .get(*i)
                .map(|c| Route::Channel(c.channel.id().clone())),
            ServerListItem::Server(i) => self.servers.get(*i).map(|s| Route::Server(s.id().clone())),
            ServerListItem::Divider => None,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let items = self.items();
        let mut next = self.cursor;
        loop {
            let Some(candidate) = next.checked_add_signed(delta).filter(|i| *i < items.len()) else {
                return;
            };
            next = candidate;
            if items[next] != ServerListItem::Divider {
                self.cursor = next;
                return;
            }
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.items().len().saturating_sub(1));
    }

    /// Index of the first server row.
    fn server_offset(&self) -> usize {
        self.items().len() - self.servers.len()
    }

    fn pick_up(&mut self) {
        let Some(ServerListItem::Server(index)) = self.items().get(self.cursor).copied() else {
            return;
        };
        debug!(index, "Picked up server");
        self.drag = Some(DragSession {
            original: self.servers.clone(),
            origin: index,
            index,
        });
    }

    fn shift_dragged(&mut self, delta: isize) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(target) = drag
            .index
            .checked_add_signed(delta)
            .filter(|t| *t < self.servers.len())
        else {
            return;
        };
        move_item(&mut self.servers, drag.index, target);
        drag.index = target;
        self.cursor = self.server_offset() + target;
    }

    fn drop_dragged(&mut self) -> Option<ServerListAction> {
        let drag = self.drag.take()?;
        debug!(from = drag.origin, to = drag.index, "Dropped server");
        Some(ServerListAction::Reorder(
            self.servers.iter().map(|s| s.id().clone()).collect(),
        ))
    }

    fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            self.servers = drag.original;
            self.cursor = self.server_offset() + drag.origin;
        }
    }
}

pub struct ServerList<'a> {
    theme: &'a Theme,
}

impl<'a> ServerList<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn badge(&self, unread: bool, mentions: u32) -> Option<Span<'static>> {
        if mentions > 0 {
            Some(Span::styled(format!(" {mentions} "), self.theme.badge_style))
        } else if unread {
            Some(Span::styled(" •", Style::default().add_modifier(Modifier::BOLD)))
        } else {
            None
        }
    }

    fn item_line(&self, state: &ServerListState, item: ServerListItem, width: usize) -> Line<'static> {
        let marker = match item {
            ServerListItem::Server(i) if state.drag.as_ref().is_some_and(|d| d.index == i) => {
                Span::styled(GRAB_MARKER, self.theme.swoosh_style)
            }
            _ if state.is_active(item) => Span::styled(SWOOSH, self.theme.swoosh_style),
            _ => Span::raw(" "),
        };

        let avatar = |id: &str, name: &str| {
            Span::styled(
                format!("[{}]", initials(name)),
                Style::default().fg(hash_id_to_color(id)),
            )
        };
        let name_width = width.saturating_sub(10);

        let mut spans = vec![marker];
        match item {
            ServerListItem::Home => {
                let name = state.user.as_ref().map_or("Home", User::display_name);
                spans.push(state.user.as_ref().map_or_else(
                    || Span::raw("[~]"),
                    |u| avatar(u.id().as_str(), u.display_name()),
                ));
                spans.push(Span::raw(" "));
                spans.push(Span::raw(truncate_to_width(name, name_width).into_owned()));
                if let Some(user) = &state.user {
                    let (glyph, colour) = presence_glyph(user.presence());
                    spans.push(Span::styled(format!(" {glyph}"), Style::default().fg(colour)));
                }
            }
            ServerListItem::Admin => {
                spans.push(Span::styled("[⚙]", self.theme.header_style));
                spans.push(Span::raw(" Admin"));
            }
            ServerListItem::Conversation(i) => {
                if let Some(c) = state.conversations.get(i) {
                    spans.push(avatar(c.channel.id().as_str(), &c.label));
                    spans.push(Span::raw(" "));
                    spans.push(Span::raw(truncate_to_width(&c.label, name_width).into_owned()));
                    spans.extend(self.badge(c.channel.is_unread(), c.channel.mentions()));
                }
            }
            ServerListItem::Divider => {
                spans.push(Span::styled(
                    "─".repeat(width.saturating_sub(2)),
                    self.theme.dimmed_style,
                ));
            }
            ServerListItem::Server(i) => {
                if let Some(s) = state.servers.get(i) {
                    let name = if s.name().trim().is_empty() { "Unnamed server" } else { s.name() };
                    spans.push(avatar(s.id().as_str(), name));
                    spans.push(Span::raw(" "));
                    spans.push(Span::raw(truncate_to_width(name, name_width).into_owned()));
                    spans.extend(self.badge(s.is_unread(), s.mentions()));
                }
            }
        }
        Line::from(spans)
    }
}

impl StatefulWidget for ServerList<'_> {
    type State = ServerListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = if state.is_dragging() { " Servers (moving) " } else { " Servers " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(state.focused))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let items = state.items();
        let height = usize::from(inner.height);
        let scroll = (state.cursor + 1).saturating_sub(height);

        for (row, (index, item)) in items.iter().enumerate().skip(scroll).take(height).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = inner.y + row as u16;
            let line_area = Rect::new(inner.x, y, inner.width, 1);
            let mut line = self.item_line(state, *item, usize::from(inner.width));
            if state.focused && index == state.cursor {
                line = line.style(self.theme.selection_style);
                buf.set_style(line_area, self.theme.selection_style);
            }
            line.render(line_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChannelKind;
    use crossterm::event::KeyEventKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn state(privileged: bool) -> ServerListState {
        let mut state = ServerListState::new();
        state.set_user(Some(User::new("me", "me").with_online(true).with_privileged(privileged)));
        state.set_conversations(vec![Conversation {
            channel: Channel::new("D1", ChannelKind::DirectMessage).with_unread(true, 2),
            label: "ann".to_string(),
        }]);
        state.set_servers(vec![
            Server::new("a", "Alpha", "me"),
            Server::new("b", "Beta", "me"),
            Server::new("c", "Gamma", "me"),
        ]);
        state
    }

    fn ids(state: &ServerListState) -> Vec<&str> {
        state.servers().iter().map(|s| s.id().as_str()).collect()
    }

    #[test]
    fn test_items_order_with_admin() {
        assert_eq!(
            state(true).items(),
            vec![
                ServerListItem::Home,
                ServerListItem::Admin,
                ServerListItem::Conversation(0),
                ServerListItem::Divider,
                ServerListItem::Server(0),
                ServerListItem::Server(1),
                ServerListItem::Server(2),
            ]
        );
        assert!(!state(false).items().contains(&ServerListItem::Admin));
    }

    #[test]
    fn test_swoosh_follows_selected_server() {
        let mut state = state(false);
        assert!(state.is_active(ServerListItem::Home));

        state.set_selected_server(Some("b".into()));

        assert!(!state.is_active(ServerListItem::Home));
        assert!(state.is_active(ServerListItem::Server(1)));
        assert!(!state.is_active(ServerListItem::Server(0)));
    }

    #[test]
    fn test_cursor_skips_divider() {
        let mut state = state(false);
        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(state.cursor(), 1);
        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(state.cursor(), 3, "divider skipped");
        state.handle_key(key(KeyCode::Char('k')));
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_enter_navigates() {
        let mut state = state(false);
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(ServerListAction::Navigate(Route::Home))
        );

        state.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(ServerListAction::Navigate(Route::Channel("D1".into())))
        );

        state.handle_key(key(KeyCode::Char('G')));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(ServerListAction::Navigate(Route::Server("c".into())))
        );
    }

    #[test]
    fn test_drop_reports_full_sequence() {
        let mut state = state(false);
        state.handle_key(key(KeyCode::Char('G')));
        state.handle_key(key(KeyCode::Char(' ')));
        assert!(state.is_dragging());

        state.handle_key(key(KeyCode::Char('k')));
        state.handle_key(key(KeyCode::Up));
        state.handle_key(key(KeyCode::Up));
        let action = state.handle_key(key(KeyCode::Enter));

        assert_eq!(
            action,
            Some(ServerListAction::Reorder(vec!["c".into(), "a".into(), "b".into()]))
        );
        assert_eq!(ids(&state), vec!["c", "a", "b"]);
        assert_eq!(state.cursor(), 3);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_drop_in_place_still_reports() {
        let mut state = state(false);
        state.handle_key(key(KeyCode::Char('G')));
        state.handle_key(key(KeyCode::Char(' ')));

        let action = state.handle_key(key(KeyCode::Char(' ')));

        assert_eq!(
            action,
            Some(ServerListAction::Reorder(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_cancel_restores_order() {
        let mut state = state(false);
        state.handle_key(key(KeyCode::Char('G')));
        state.handle_key(key(KeyCode::Char(' ')));
        state.handle_key(key(KeyCode::Char('k')));
        assert_eq!(ids(&state), vec!["a", "c", "b"]);

        assert_eq!(state.handle_key(key(KeyCode::Esc)), None);

        assert_eq!(ids(&state), vec!["a", "b", "c"]);
        assert_eq!(state.cursor(), 5);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_space_on_non_server_does_not_grab() {
        let mut state = state(false);
        state.handle_key(key(KeyCode::Char(' ')));
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_render_shows_entries() {
        let theme = Theme::default();
        let mut state = state(true);
        state.set_servers(vec![Server::new("a", "  ", "me"), Server::new("b", "Beta", "me").with_unread(true, 3)]);
        let mut terminal = Terminal::new(TestBackend::new(24, 10)).unwrap();

        terminal
            .draw(|f| f.render_stateful_widget(ServerList::new(&theme), f.area(), &mut state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..10)
            .map(|y| (0..24).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        assert!(rows[1].contains("▌[M] me"));
        assert!(rows[2].contains("Admin"));
        assert!(rows[3].contains("ann") && rows[3].contains(" 2 "));
        assert!(rows[4].contains("──"));
        assert!(rows[5].contains("Unnamed"));
        assert!(rows[6].contains("Beta") && rows[6].contains(" 3 "));
    }
}
