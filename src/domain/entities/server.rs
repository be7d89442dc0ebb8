//! Chat server entity.

use serde::{Deserialize, Serialize};

use super::id::string_id;
use super::{ChannelId, Permissions, Role, RoleId, UserId};

string_id!(
    /// Unique identifier for a server.
    ServerId
);

/// Server (community) information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Server {
    id: ServerId,
    name: String,
    owner: UserId,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    default_permissions: u64,
    #[serde(default)]
    channels: Vec<ChannelId>,
    #[serde(default)]
    unread: bool,
    #[serde(default)]
    mentions: u32,
}

impl Server {
    /// Creates a new server with the given ID, name, and owner.
    #[must_use]
    pub fn new(id: impl Into<ServerId>, name: impl Into<String>, owner: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
            icon: None,
            roles: Vec::new(),
            default_permissions: 0,
            channels: Vec::new(),
            unread: false,
            mentions: 0,
        }
    }

    /// Sets the server icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the server roles.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the permissions every member starts from.
    #[must_use]
    pub const fn with_default_permissions(mut self, permissions: Permissions) -> Self {
        self.default_permissions = permissions.bits();
        self
    }

    /// Sets the server's channel ids.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<ChannelId>) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the unread state and mention count.
    #[must_use]
    pub const fn with_unread(mut self, unread: bool, mentions: u32) -> Self {
        self.unread = unread;
        self.mentions = mentions;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ServerId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn channel_ids(&self) -> &[ChannelId] {
        &self.channels
    }

    #[must_use]
    pub const fn default_permissions(&self) -> Permissions {
        Permissions::from_bits_truncate(self.default_permissions)
    }

    #[must_use]
    pub const fn is_unread(&self) -> bool {
        self.unread
    }

    #[must_use]
    pub const fn mentions(&self) -> u32 {
        self.mentions
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Looks up a role by id.
    #[must_use]
    pub fn role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| &r.id == id)
    }

    /// Returns roles in precedence order (lowest rank first).
    #[must_use]
    pub fn ordered_roles(&self) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self.roles.iter().collect();
        roles.sort_by_key(|r| r.rank);
        roles
    }

    /// Returns hoisted roles in precedence order.
    #[must_use]
    pub fn hoisted_roles(&self) -> Vec<Role> {
        self.ordered_roles()
            .into_iter()
            .filter(|r| r.hoist)
            .cloned()
            .collect()
    }
}
