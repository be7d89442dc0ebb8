//! In-memory chat data cache backed by a snapshot.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::Snapshot;
use crate::domain::entities::{Channel, ChannelId, ChannelKind, Member, Server, ServerId, User, UserId};
use crate::domain::errors::DataError;
use crate::domain::ports::ChatDataPort;

#[derive(Debug, Default)]
struct CacheState {
    self_id: Option<UserId>,
    users: HashMap<UserId, User>,
    servers: Vec<Server>,
    channels: Vec<Channel>,
    /// Members visible through the port.
    loaded: HashMap<ServerId, Vec<Member>>,
    /// Members that appear once their server is synchronised.
    pending: HashMap<ServerId, Vec<Member>>,
    revision: u64,
}

impl CacheState {
    fn is_online(&self, user: &UserId) -> bool {
        self.users.get(user).is_some_and(User::is_online)
    }
}

/// Serves chat data from a snapshot as if it were a live client cache.
///
/// Only the current user's own memberships are visible up front; the rest of
/// each server's member list arrives through [`ChatDataPort::sync_members`].
#[derive(Debug)]
pub struct SnapshotChatClient {
    state: RwLock<CacheState>,
}

impl SnapshotChatClient {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        let Snapshot {
            self_id,
            users,
            servers,
            channels,
            members,
        } = snapshot;

        let mut loaded: HashMap<ServerId, Vec<Member>> = HashMap::new();
        let mut pending: HashMap<ServerId, Vec<Member>> = HashMap::new();
        for member in members {
            let target = if self_id.as_ref() == Some(member.user_id()) {
                &mut loaded
            } else {
                &mut pending
            };
            target
                .entry(member.server_id().clone())
                .or_default()
                .push(member);
        }

        info!(
            users = users.len(),
            servers = servers.len(),
            channels = channels.len(),
            "Loaded chat snapshot"
        );

        Self {
            state: RwLock::new(CacheState {
                self_id,
                users: users.into_iter().map(|u| (u.id().clone(), u)).collect(),
                servers,
                channels,
                loaded,
                pending,
                revision: 1,
            }),
        }
    }

    /// Updates a user's online state.
    pub fn set_online(&self, user: &UserId, online: bool) {
        let mut state = self.state.write();
        if let Some(u) = state.users.get_mut(user)
            && u.is_online() != online
        {
            u.set_online(online);
            state.revision += 1;
        }
    }
}

#[async_trait]
impl ChatDataPort for SnapshotChatClient {
    fn current_user(&self) -> Option<User> {
        let state = self.state.read();
        state
            .self_id
            .as_ref()
            .and_then(|id| state.users.get(id))
            .cloned()
    }

    fn servers(&self) -> Vec<Server> {
        self.state.read().servers.clone()
    }

    fn server(&self, id: &ServerId) -> Option<Server> {
        self.state.read().servers.iter().find(|s| s.id() == id).cloned()
    }

    fn channel(&self, id: &ChannelId) -> Option<Channel> {
        self.state
            .read()
            .channels
            .iter()
            .find(|c| c.id() == id)
            .cloned()
    }

    fn server_channels(&self, id: &ServerId) -> Vec<Channel> {
        let state = self.state.read();
        let Some(server) = state.servers.iter().find(|s| s.id() == id) else {
            return Vec::new();
        };
        server
            .channel_ids()
            .iter()
            .filter_map(|cid| state.channels.iter().find(|c| c.id() == cid))
            .cloned()
            .collect()
    }

    fn unread_conversations(&self) -> Vec<Channel> {
        self.state
            .read()
            .channels
            .iter()
            .filter(|c| {
                matches!(c.kind(), ChannelKind::DirectMessage | ChannelKind::Group) && c.is_unread()
            })
            .cloned()
            .collect()
    }

    fn members(&self, server: &ServerId) -> Vec<Member> {
        self.state
            .read()
            .loaded
            .get(server)
            .cloned()
            .unwrap_or_default()
    }

    fn user(&self, id: &UserId) -> Option<User> {
        self.state.read().users.get(id).cloned()
    }

    fn revision(&self) -> u64 {
        self.state.read().revision
    }

    async fn sync_members(
        &self,
        server: &ServerId,
        exclude_offline: bool,
    ) -> Result<usize, DataError> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        if !state.servers.iter().any(|s| s.id() == server) {
            return Err(DataError::UnknownServer(server.clone()));
        }

        let pending = state.pending.remove(server).unwrap_or_default();
        let (fetched, remaining): (Vec<Member>, Vec<Member>) = pending
            .into_iter()
            .partition(|m| !exclude_offline || state.is_online(m.user_id()));

        if !remaining.is_empty() {
            state.pending.insert(server.clone(), remaining);
        }

        let fetched_count = fetched.len();
        let loaded = state.loaded.entry(server.clone()).or_default();
        loaded.extend(fetched);
        let total = loaded.len();

        if fetched_count > 0 {
            state.revision += 1;
        }
        debug!(server = %server, fetched = fetched_count, total, "Members synchronised from snapshot");

        Ok(total)
    }
}
