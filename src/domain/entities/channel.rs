//! Chat channel entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::string_id;
use super::{PermissionOverride, RoleId, ServerId, UserId};

string_id!(
    /// Unique identifier for a channel.
    ChannelId
);

/// Channel type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Personal notes channel.
    SavedMessages,
    /// One-to-one conversation.
    DirectMessage,
    /// Group conversation.
    Group,
    /// Server text channel.
    #[default]
    TextChannel,
    /// Legacy server voice channel.
    VoiceChannel,
    /// Any type this client does not know about.
    #[serde(other)]
    Unknown,
}

impl ChannelKind {
    /// Returns true if this channel type carries text messages.
    #[must_use]
    pub const fn is_text_bearing(self) -> bool {
        matches!(
            self,
            Self::TextChannel | Self::DirectMessage | Self::Group | Self::SavedMessages
        )
    }

    /// Returns true if this is a legacy voice channel.
    #[must_use]
    pub const fn is_legacy_voice(self) -> bool {
        matches!(self, Self::VoiceChannel)
    }

    /// Returns the display prefix for this channel type.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::VoiceChannel => "🔊",
            Self::DirectMessage | Self::Group => "@",
            Self::SavedMessages => "★",
            Self::Unknown => "?",
            Self::TextChannel => "#",
        }
    }
}

/// Channel information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    #[serde(rename = "channel_type")]
    kind: ChannelKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    server: Option<ServerId>,
    #[serde(default)]
    recipients: Vec<UserId>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_permissions: Option<PermissionOverride>,
    #[serde(default)]
    role_permissions: BTreeMap<RoleId, PermissionOverride>,
    #[serde(default)]
    unread: bool,
    #[serde(default)]
    mentions: u32,
}

impl Channel {
    /// Creates a new channel with the given ID and type.
    #[must_use]
    pub fn new(id: impl Into<ChannelId>, kind: ChannelKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            server: None,
            recipients: Vec::new(),
            icon: None,
            description: None,
            default_permissions: None,
            role_permissions: BTreeMap::new(),
            unread: false,
            mentions: 0,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the server this channel belongs to.
    #[must_use]
    pub fn with_server(mut self, server: impl Into<ServerId>) -> Self {
        self.server = Some(server.into());
        self
    }

    #[must_use]
    pub fn with_recipients(mut self, recipients: Vec<UserId>) -> Self {
        self.recipients = recipients;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_default_permissions(mut self, permissions: PermissionOverride) -> Self {
        self.default_permissions = Some(permissions);
        self
    }

    #[must_use]
    pub fn with_role_permissions(mut self, role: impl Into<RoleId>, ov: PermissionOverride) -> Self {
        self.role_permissions.insert(role.into(), ov);
        self
    }

    #[must_use]
    pub const fn with_unread(mut self, unread: bool, mentions: u32) -> Self {
        self.unread = unread;
        self.mentions = mentions;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ChannelId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn server_id(&self) -> Option<&ServerId> {
        self.server.as_ref()
    }

    #[must_use]
    pub fn recipient_ids(&self) -> &[UserId] {
        &self.recipients
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn default_permissions(&self) -> Option<&PermissionOverride> {
        self.default_permissions.as_ref()
    }

    #[must_use]
    pub fn role_permissions(&self, role: &RoleId) -> Option<&PermissionOverride> {
        self.role_permissions.get(role)
    }

    #[must_use]
    pub const fn is_unread(&self) -> bool {
        self.unread
    }

    #[must_use]
    pub const fn mentions(&self) -> u32 {
        self.mentions
    }

    /// Iterates the per-role overrides set on this channel.
    pub fn role_overrides(&self) -> impl Iterator<Item = &PermissionOverride> {
        self.role_permissions.values()
    }

    /// Returns the display name with the channel type prefix.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.name.as_deref().unwrap_or(""))
    }
}
