//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::home_screen::{HomePanel, HomeScreen};
use crate::application::services::{apply_saved_order, conversation_label};
use crate::application::use_cases::{
    ChannelPageView, ResolveChannelPageUseCase, SyncMembersUseCase,
};
use crate::domain::entities::{ChannelId, ServerId};
use crate::domain::keybinding::Action;
use crate::domain::ports::ChatDataPort;
use crate::domain::routing::Route;
use crate::domain::services::PermissionCalculator;
use crate::infrastructure::{AppConfig, ClipboardService, StateConfig, StorageManager};
use crate::presentation::commands::{CommandRegistry, canonical_key};
use crate::presentation::events::{AppEvent, EventResult, key_press};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ChannelPage, Conversation, FocusContext, FooterBar, FooterBarStyle, MemberSidebarAction,
    MemberSidebarState, ServerList, ServerListAction, ServerListState, StatusLevel,
};

pub struct App {
    port: Arc<dyn ChatDataPort>,
    storage: StorageManager,
    sync_members: Arc<SyncMembersUseCase>,
    resolve_channel: ResolveChannelPageUseCase,
    commands: CommandRegistry,
    theme: Theme,
    clipboard: ClipboardService,
    server_list: ServerListState,
    sidebar: MemberSidebarState,
    route: Route,
    page: ChannelPageView,
    focus: FocusContext,
    status: Option<(String, StatusLevel)>,
    saved_state: StateConfig,
    last_revision: Option<u64>,
    server_list_width: u16,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(port: Arc<dyn ChatDataPort>, storage: StorageManager, config: &AppConfig) -> Self {
        let saved_state = storage.load_state().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load saved state, starting fresh");
            StateConfig::default()
        });
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut server_list = ServerListState::new();
        server_list.set_focused(true);

        Self {
            sync_members: Arc::new(SyncMembersUseCase::new(
                Arc::clone(&port),
                config.members.full_sync_exempt.iter().cloned(),
            )),
            resolve_channel: ResolveChannelPageUseCase::new(Arc::clone(&port)),
            port,
            storage,
            commands: CommandRegistry::with_overrides(&config.keybindings),
            theme: Theme::new(&config.theme.accent_color),
            clipboard: ClipboardService::new(),
            server_list,
            sidebar: MemberSidebarState::new(config.ui.member_item_height, config.ui.show_offline),
            route: Route::Home,
            page: ChannelPageView::NotFound,
            focus: FocusContext::Servers,
            status: None,
            saved_state,
            last_revision: None,
            server_list_width: config.ui.server_list_width,
            event_tx,
            event_rx,
            should_quit: false,
        }
    }

    /// Reopens the server saved from the previous session, if it still
    /// exists.
    pub fn restore_last_route(&mut self) {
        self.refresh();
        let Some(server) = self.saved_state.last_server_id.clone() else {
            return;
        };
        if self.port.server(&server).is_some() {
            info!(server = %server, "Restoring last server");
            self.navigate(Route::Server(server));
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal or reading its events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        self.restore_last_route();
        terminal.draw(|frame| self.render(frame))?;

        while !self.should_quit {
            let terminal_event = terminal_events.next();

            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }

                maybe_event = terminal_event => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(key) = key_press(&event)
                            && self.handle_key(key) == EventResult::Exit
                        {
                            self.should_quit = true;
                        }
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "Terminal event stream failed");
                        return Err(e.into());
                    }
                    None => break,
                },
            }

            self.refresh();
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("Application exiting normally");
        Ok(())
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn page(&self) -> &ChannelPageView {
        &self.page
    }

    #[must_use]
    pub const fn focus(&self) -> FocusContext {
        self.focus
    }

    #[must_use]
    pub fn status(&self) -> Option<(&str, StatusLevel)> {
        self.status.as_ref().map(|(text, level)| (text.as_str(), *level))
    }

    /// Context driving the footer hints.
    #[must_use]
    pub fn footer_context(&self) -> FocusContext {
        if self.server_list.is_dragging() {
            FocusContext::Reorder
        } else if self.sidebar.is_menu_open() {
            FocusContext::Menu
        } else {
            self.focus
        }
    }

    /// Re-reads the data port when its revision moved and re-derives the
    /// sidebar, which is memoised and cheap when nothing changed.
    pub fn refresh(&mut self) {
        let revision = self.port.revision();
        if self.last_revision != Some(revision) {
            debug!(revision, "Data revision changed, refreshing views");
            self.last_revision = Some(revision);

            if !self.server_list.is_dragging() {
                let servers = apply_saved_order(self.port.servers(), &self.saved_state.server_order);
                self.server_list.set_servers(servers);
            }

            let user = self.port.current_user();
            let self_id = user.as_ref().map(|u| u.id().clone());
            let conversations = self
                .port
                .unread_conversations()
                .into_iter()
                .map(|channel| Conversation {
                    label: conversation_label(&channel, self_id.as_ref(), |id| self.port.user(id)),
                    channel,
                })
                .collect();
            self.server_list.set_conversations(conversations);
            self.server_list.set_user(user);

            self.page = self.resolve_channel.execute(self.route.channel_id());
        }

        self.sidebar.refresh(self.port.as_ref(), self.page.channel());
        if self.focus == FocusContext::Members && !self.sidebar.is_visible() {
            self.set_focus(FocusContext::Channel);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if self.server_list.is_dragging() {
            let key = self.local_key(key);
            return self.forward_to_server_list(key);
        }
        if self.sidebar.is_menu_open() {
            let key = self.local_key(key);
            return self.forward_to_sidebar(key);
        }

        match self.commands.find_action(key) {
            Some(Action::Quit) => EventResult::Exit,
            Some(Action::FocusServers) => self.set_focus(FocusContext::Servers),
            Some(Action::FocusMembers) => self.set_focus(FocusContext::Members),
            Some(Action::FocusNext) => self.cycle_focus(true),
            Some(Action::FocusPrevious) => self.cycle_focus(false),
            Some(Action::GoHome) => {
                self.navigate(Route::Home);
                EventResult::Consumed
            }
            Some(Action::GoAdmin) => self.go_admin(),
            Some(Action::NextChannel) => self.cycle_channel(1),
            Some(Action::PreviousChannel) => self.cycle_channel(-1),
            action => {
                let key = action.and_then(canonical_key).unwrap_or(key);
                match self.focus {
                    FocusContext::Servers => self.forward_to_server_list(key),
                    FocusContext::Members => self.forward_to_sidebar(key),
                    FocusContext::Channel | FocusContext::Reorder | FocusContext::Menu => {
                        EventResult::Continue
                    }
                }
            }
        }
    }

    fn local_key(&self, key: KeyEvent) -> KeyEvent {
        self.commands
            .find_action(key)
            .and_then(canonical_key)
            .unwrap_or(key)
    }

    fn forward_to_server_list(&mut self, key: KeyEvent) -> EventResult {
        match self.server_list.handle_key(key) {
            Some(ServerListAction::Navigate(route)) => {
                self.navigate(route);
                EventResult::Consumed
            }
            Some(ServerListAction::Reorder(order)) => {
                self.persist_server_order(order);
                EventResult::Consumed
            }
            None => EventResult::Consumed,
        }
    }

    fn forward_to_sidebar(&mut self, key: KeyEvent) -> EventResult {
        if let Some(MemberSidebarAction::CopyToClipboard { text, what }) = self.sidebar.handle_key(key) {
            self.clipboard.set_text(text);
            self.set_status(format!("Copied {what}"), StatusLevel::Success);
        }
        EventResult::Consumed
    }

    fn set_focus(&mut self, focus: FocusContext) -> EventResult {
        let focus = if focus == FocusContext::Members && !self.sidebar.is_visible() {
            FocusContext::Channel
        } else {
            focus
        };
        self.focus = focus;
        self.server_list.set_focused(focus == FocusContext::Servers);
        self.sidebar.set_focused(focus == FocusContext::Members);
        EventResult::Consumed
    }

    fn cycle_focus(&mut self, forward: bool) -> EventResult {
        let mut order = vec![FocusContext::Servers, FocusContext::Channel];
        if self.sidebar.is_visible() {
            order.push(FocusContext::Members);
        }
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.set_focus(order[next])
    }

    fn go_admin(&mut self) -> EventResult {
        if self.port.current_user().is_some_and(|u| u.is_privileged()) {
            self.navigate(Route::Admin);
        } else {
            self.set_status("Admin panel requires a privileged account", StatusLevel::Warning);
        }
        EventResult::Consumed
    }

    fn cycle_channel(&mut self, delta: isize) -> EventResult {
        let Route::ServerChannel(server, channel) = &self.route else {
            return EventResult::Continue;
        };
        let channels = self.port.server_channels(server);
        if channels.is_empty() {
            return EventResult::Consumed;
        }
        let current = channels.iter().position(|c| c.id() == channel).unwrap_or(0);
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let next = (current as isize + delta).rem_euclid(channels.len() as isize) as usize;
        let route = Route::ServerChannel(server.clone(), channels[next].id().clone());
        self.navigate(route);
        EventResult::Consumed
    }

    /// Channel opened when a server is selected: the last one used if it
    /// belongs to this server, else the first one the user can see.
    fn landing_channel(&self, server_id: &ServerId) -> Option<ChannelId> {
        let channels = self.port.server_channels(server_id);

        if let Some(last) = &self.saved_state.last_channel_id
            && channels.iter().any(|c| c.id() == last)
        {
            return Some(last.clone());
        }

        let server = self.port.server(server_id)?;
        let own_member = self.port.current_user().and_then(|user| {
            self.port
                .members(server_id)
                .into_iter()
                .find(|m| m.user_id() == user.id())
        });

        channels
            .iter()
            .find(|c| {
                own_member
                    .as_ref()
                    .is_none_or(|m| PermissionCalculator::can_view(&server, c, m))
            })
            .or_else(|| channels.first())
            .map(|c| c.id().clone())
    }

    pub fn navigate(&mut self, route: Route) {
        let route = match route {
            Route::Server(server) => match self.landing_channel(&server) {
                Some(channel) => Route::ServerChannel(server, channel),
                None => Route::Server(server),
            },
            other => other,
        };
        debug!(route = %route, "Navigating");

        self.server_list.set_selected_server(route.server_id().cloned());
        self.page = self.resolve_channel.execute(route.channel_id());
        self.sidebar.refresh(self.port.as_ref(), self.page.channel());

        if let Some(server) = route.server_id() {
            if self.page.has_member_sidebar() && self.sync_members.needs_sync(server) {
                self.spawn_member_sync(server.clone());
            }
            self.persist_location(server.clone(), route.channel_id().cloned());
        }

        self.route = route;
    }

    fn spawn_member_sync(&self, server: ServerId) {
        let sync_members = Arc::clone(&self.sync_members);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = sync_members.execute(&server).await;
            if tx.send(AppEvent::MembersSynced { server, result }).is_err() {
                debug!("App loop closed before member sync finished");
            }
        });
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::MembersSynced { server, result } => match result {
                Ok(Some(count)) => {
                    debug!(server = %server, count, "Member sync finished");
                    self.set_status(format!("Loaded {count} members"), StatusLevel::Info);
                }
                Ok(None) => {}
                Err(e) => {
                    self.set_status(format!("Member sync failed: {e}"), StatusLevel::Error);
                }
            },
        }
    }

    fn persist_server_order(&mut self, order: Vec<ServerId>) {
        info!(count = order.len(), "Saving server order");
        self.saved_state.server_order.clone_from(&order);
        if let Err(e) = self.storage.update_state(|state| state.server_order = order) {
            warn!(error = %e, "Failed to save server order");
            self.set_status("Could not save server order", StatusLevel::Warning);
        }
    }

    fn persist_location(&mut self, server: ServerId, channel: Option<ChannelId>) {
        if self.saved_state.last_server_id.as_ref() == Some(&server)
            && self.saved_state.last_channel_id == channel
        {
            return;
        }
        self.saved_state.last_server_id = Some(server.clone());
        self.saved_state.last_channel_id.clone_from(&channel);
        if let Err(e) = self.storage.update_state(|state| {
            state.last_server_id = Some(server);
            state.last_channel_id = channel;
        }) {
            warn!(error = %e, "Failed to save last location");
        }
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some((text.into(), level));
    }

    fn render(&mut self, frame: &mut Frame) {
        let [main, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [servers, content] = Layout::horizontal([
            Constraint::Length(self.server_list_width),
            Constraint::Fill(1),
        ])
        .areas(main);

        frame.render_stateful_widget(ServerList::new(&self.theme), servers, &mut self.server_list);

        match &self.route {
            Route::Home | Route::Admin => {
                let panel = if self.route == Route::Admin {
                    HomePanel::Admin
                } else {
                    HomePanel::Home
                };
                let user = self.port.current_user();
                let screen = HomeScreen::new(panel, user.as_ref(), &self.theme)
                    .counts(self.server_list.servers().len(), self.port.unread_conversations().len());
                frame.render_widget(screen, content);
            }
            Route::Channel(_) | Route::Server(_) | Route::ServerChannel(..) => {
                let self_id = self.port.current_user().map(|u| u.id().clone());
                let title = self
                    .page
                    .channel()
                    .filter(|c| c.server_id().is_none())
                    .map(|c| conversation_label(c, self_id.as_ref(), |id| self.port.user(id)));
                frame.render_stateful_widget(
                    ChannelPage::new(&self.page, &self.theme).title(title.as_deref()),
                    content,
                    &mut self.sidebar,
                );
            }
        }

        let context = self.footer_context();
        let bindings = self.commands.bindings_for(context);
        frame.render_widget(
            FooterBar::new(&bindings)
                .focus_context(context)
                .status(self.status())
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Channel, ChannelKind, Member, MemberId, Server, User};
    use crate::infrastructure::{Snapshot, SnapshotChatClient};
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            self_id: Some("U".into()),
            users: vec![
                User::new("U", "me").with_online(true),
                User::new("F", "friend").with_online(true),
            ],
            servers: vec![
                Server::new("S1", "First", "U").with_channels(vec!["T1".into(), "T2".into()]),
                Server::new("S2", "Second", "U").with_channels(vec!["V2".into()]),
            ],
            channels: vec![
                Channel::new("T1", ChannelKind::TextChannel).with_name("general").with_server("S1"),
                Channel::new("T2", ChannelKind::TextChannel).with_name("random").with_server("S1"),
                Channel::new("V2", ChannelKind::VoiceChannel).with_name("voice").with_server("S2"),
                Channel::new("D1", ChannelKind::DirectMessage)
                    .with_recipients(vec!["U".into(), "F".into()])
                    .with_unread(true, 1),
            ],
            members: vec![
                Member::new(MemberId::new("S1", "U")),
                Member::new(MemberId::new("S1", "F")),
                Member::new(MemberId::new("S2", "U")),
            ],
        }
    }

    fn app(dir: &TempDir) -> App {
        let port: Arc<dyn ChatDataPort> = Arc::new(SnapshotChatClient::new(snapshot()));
        let storage = StorageManager::with_dir(dir.path().to_path_buf());
        let mut app = App::new(port, storage, &AppConfig::default());
        app.refresh();
        app
    }

    #[tokio::test]
    async fn test_starts_at_home_with_conversation_label() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        assert_eq!(app.route(), &Route::Home);
        assert_eq!(app.focus(), FocusContext::Servers);
        assert_eq!(app.server_list.servers().len(), 2);
    }

    #[tokio::test]
    async fn test_server_navigation_picks_first_channel_and_syncs() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.navigate(Route::Server("S1".into()));

        assert_eq!(app.route(), &Route::ServerChannel("S1".into(), "T1".into()));
        assert!(matches!(app.page(), ChannelPageView::Text(c) if c.id().as_str() == "T1"));

        let event = app.event_rx.recv().await.unwrap();
        app.handle_app_event(event);
        app.refresh();

        assert_eq!(app.status(), Some(("Loaded 2 members", StatusLevel::Info)));
        assert_eq!(app.sidebar.online_count(), Some(2));

        let state = StorageManager::with_dir(dir.path().to_path_buf()).load_state().unwrap();
        assert_eq!(state.last_server_id, Some("S1".into()));
        assert_eq!(state.last_channel_id, Some("T1".into()));
    }

    #[tokio::test]
    async fn test_channel_cycling_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.navigate(Route::Server("S1".into()));

        app.handle_key(key(KeyCode::Char(']')));
        assert_eq!(app.route(), &Route::ServerChannel("S1".into(), "T2".into()));
        app.handle_key(key(KeyCode::Char(']')));
        assert_eq!(app.route(), &Route::ServerChannel("S1".into(), "T1".into()));
    }

    #[tokio::test]
    async fn test_voice_server_skips_sync() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.navigate(Route::Server("S2".into()));

        assert!(matches!(app.page(), ChannelPageView::LegacyVoice(_)));
        assert!(app.event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reorder_is_persisted() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.handle_key(key(KeyCode::Char('G')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.footer_context(), FocusContext::Reorder);
        app.handle_key(key(KeyCode::Char('k')));
        app.handle_key(key(KeyCode::Enter));

        let state = StorageManager::with_dir(dir.path().to_path_buf()).load_state().unwrap();
        assert_eq!(state.server_order, vec![ServerId::from("S2"), ServerId::from("S1")]);
        assert_eq!(app.server_list.servers()[0].id().as_str(), "S2");
    }

    #[tokio::test]
    async fn test_restores_last_server() {
        let dir = TempDir::new().unwrap();
        StorageManager::with_dir(dir.path().to_path_buf())
            .update_state(|s| {
                s.last_server_id = Some("S1".into());
                s.last_channel_id = Some("T2".into());
            })
            .unwrap();
        let mut app = app(&dir);

        app.restore_last_route();

        assert_eq!(app.route(), &Route::ServerChannel("S1".into(), "T2".into()));
    }

    #[tokio::test]
    async fn test_focus_members_needs_visible_sidebar() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.focus(), FocusContext::Channel);

        app.navigate(Route::Server("S1".into()));
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.focus(), FocusContext::Members);
    }

    #[tokio::test]
    async fn test_admin_requires_privilege() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        app.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));

        assert_eq!(app.route(), &Route::Home);
        assert_eq!(app.status().map(|s| s.1), Some(StatusLevel::Warning));
    }

    #[tokio::test]
    async fn test_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), EventResult::Exit);
    }
}
