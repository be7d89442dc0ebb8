//! Permission bits and overrides.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Permission bits as laid out by the chat platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u64 {
        const MANAGE_CHANNEL = 1 << 0;
        const MANAGE_SERVER = 1 << 1;
        const MANAGE_PERMISSIONS = 1 << 2;
        const MANAGE_ROLE = 1 << 3;
        const MANAGE_CUSTOMISATION = 1 << 4;
        const KICK_MEMBERS = 1 << 6;
        const BAN_MEMBERS = 1 << 7;
        const TIMEOUT_MEMBERS = 1 << 8;
        const ASSIGN_ROLES = 1 << 9;
        const CHANGE_NICKNAME = 1 << 10;
        const MANAGE_NICKNAMES = 1 << 11;
        const CHANGE_AVATAR = 1 << 12;
        const REMOVE_AVATARS = 1 << 13;
        const VIEW_CHANNEL = 1 << 20;
        const READ_MESSAGE_HISTORY = 1 << 21;
        const SEND_MESSAGE = 1 << 22;
        const MANAGE_MESSAGES = 1 << 23;
        const MANAGE_WEBHOOKS = 1 << 24;
        const INVITE_OTHERS = 1 << 25;
        const SEND_EMBEDS = 1 << 26;
        const UPLOAD_FILES = 1 << 27;
        const MASQUERADE = 1 << 28;
        const REACT = 1 << 29;
        const CONNECT = 1 << 30;
        const SPEAK = 1 << 31;
        const VIDEO = 1 << 32;
        const MUTE_MEMBERS = 1 << 33;
        const DEAFEN_MEMBERS = 1 << 34;
        const MOVE_MEMBERS = 1 << 35;
    }
}

impl Permissions {
    /// Permissions left to a member while they are timed out.
    pub const TIMEOUT_ALLOWED: Self = Self::VIEW_CHANNEL.union(Self::READ_MESSAGE_HISTORY);
}

/// Allow/deny pair applied on top of inherited permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionOverride {
    #[serde(rename = "a", default)]
    allow: u64,
    #[serde(rename = "d", default)]
    deny: u64,
}

impl PermissionOverride {
    #[must_use]
    pub const fn new(allow: Permissions, deny: Permissions) -> Self {
        Self {
            allow: allow.bits(),
            deny: deny.bits(),
        }
    }

    #[must_use]
    pub const fn allow(&self) -> Permissions {
        Permissions::from_bits_truncate(self.allow)
    }

    #[must_use]
    pub const fn deny(&self) -> Permissions {
        Permissions::from_bits_truncate(self.deny)
    }

    /// Applies this override: denied bits are cleared, then allowed bits set.
    #[must_use]
    pub const fn apply(&self, base: Permissions) -> Permissions {
        base.difference(self.deny()).union(self.allow())
    }

    /// Returns true if this override denies the given permission.
    #[must_use]
    pub const fn denies(&self, permission: Permissions) -> bool {
        self.deny().contains(permission)
    }
}
